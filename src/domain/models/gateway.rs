#[cfg(test)]
#[path = "gateway_test.rs"]
mod tests;

use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::ChatSession;
use super::ClientError;
use super::Document;
use super::UploadResult;
use super::User;

/// How questions reach the backend. The two contracts are exclusive, one is
/// picked through configuration for the lifetime of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ChatMode {
    /// Every question is posted together with the document.
    Combined,
    /// The document is indexed once through the embeddings endpoint, then
    /// questions are posted alone.
    TwoPhase,
}

impl ChatMode {
    pub fn parse(text: String) -> Option<ChatMode> {
        return ChatMode::iter().find(|e| return e.to_string() == text);
    }

    pub fn requires_embeddings(&self) -> bool {
        return *self == ChatMode::TwoPhase;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    #[serde(rename = "userName")]
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// The backend echoes the stored account, keyed by `_id` on some versions.
/// Every field is optional so a created account never decodes as a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupResponse {
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(default, rename = "userName")]
    pub user_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingStatus {
    #[serde(default)]
    pub status: String,
    pub error: Option<String>,
}

impl EmbeddingStatus {
    pub fn is_complete(&self) -> bool {
        return self.error.is_none() && !self.status.trim().is_empty();
    }
}

#[async_trait]
pub trait AuthGateway {
    /// Registers a new account. Field checks run before any request is made.
    async fn signup(
        &self,
        user_name: &str,
        email: &str,
        password: &str,
    ) -> Result<SignupResponse, ClientError>;

    /// Exchanges credentials for a token and stores it in the session.
    async fn login(&self, email: &str, password: &str) -> Result<String, ClientError>;

    async fn current_user(&self) -> Result<User, ClientError>;

    /// Forgets the session locally. The backend is not contacted.
    fn logout(&self);
}

#[async_trait]
pub trait UploadGateway {
    async fn upload_file(&self, document: &Document) -> Result<UploadResult, ClientError>;
}

#[async_trait]
pub trait ChatGateway {
    fn mode(&self) -> ChatMode;

    /// Asks the backend to index the most recently uploaded document. Only
    /// meaningful in two-phase mode.
    async fn generate_embeddings(&self) -> Result<EmbeddingStatus, ClientError>;

    /// Sends a question and returns the answer. In combined mode the document
    /// travels with the question.
    async fn send_message(
        &self,
        question: &str,
        document: Option<&Document>,
    ) -> Result<String, ClientError>;
}

#[async_trait]
pub trait HistoryGateway {
    async fn fetch_history(&self) -> Result<Vec<ChatSession>, ClientError>;
}

pub type AuthGatewayBox = Box<dyn AuthGateway + Send + Sync>;
pub type UploadGatewayBox = Box<dyn UploadGateway + Send + Sync>;
pub type ChatGatewayBox = Box<dyn ChatGateway + Send + Sync>;
pub type HistoryGatewayBox = Box<dyn HistoryGateway + Send + Sync>;
