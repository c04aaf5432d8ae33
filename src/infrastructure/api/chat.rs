#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use async_trait::async_trait;
use reqwest::multipart::Form;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Value;

use super::document_part;
use super::ApiClient;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatGateway;
use crate::domain::models::ChatMode;
use crate::domain::models::ClientError;
use crate::domain::models::Document;
use crate::domain::models::EmbeddingStatus;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatRequest {
    user_question: String,
}

/// The answer endpoint replies with a bare JSON string, an object holding the
/// answer, or plain text.
pub fn parse_answer(status: u16, body: &str) -> Result<String, ClientError> {
    let value = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(_) => return Ok(body.to_string()),
    };

    match value {
        Value::String(answer) => return Ok(answer),
        Value::Object(map) => {
            if map.get("success").and_then(|e| return e.as_bool()) == Some(false) {
                let message = map
                    .get("message")
                    .or_else(|| return map.get("answer"))
                    .and_then(|e| return e.as_str())
                    .unwrap_or("The backend could not answer the question");
                return Err(ClientError::remote(Some(status), message));
            }

            if let Some(answer) = map.get("answer").and_then(|e| return e.as_str()) {
                return Ok(answer.to_string());
            }

            if let Some(error) = map.get("Error").or_else(|| return map.get("error")) {
                let message = error.as_str().unwrap_or("The backend could not answer the question");
                return Err(ClientError::remote(Some(status), message));
            }

            return Err(ClientError::remote(
                Some(status),
                "Unexpected response from the backend: no answer",
            ));
        }
        other => return Ok(other.to_string()),
    }
}

pub struct ApiChat {
    client: ApiClient,
    mode: ChatMode,
}

impl ApiChat {
    pub fn new(client: ApiClient, mode: ChatMode) -> ApiChat {
        return ApiChat { client, mode };
    }

    pub fn from_config(client: ApiClient) -> ApiChat {
        let mode = ChatMode::parse(Config::get(ConfigKey::ChatMode)).unwrap_or(ChatMode::Combined);
        return ApiChat::new(client, mode);
    }
}

#[async_trait]
impl ChatGateway for ApiChat {
    fn mode(&self) -> ChatMode {
        return self.mode;
    }

    #[allow(clippy::implicit_return)]
    async fn generate_embeddings(&self) -> Result<EmbeddingStatus, ClientError> {
        if !self.mode.requires_embeddings() {
            return Err(ClientError::validation(
                "Embeddings are only generated in two-phase chat mode",
            ));
        }

        tracing::debug!("requesting document embeddings");
        let res = self
            .client
            .send_authorized(
                self.client.post("/inset"),
                "Failed to index the document",
            )
            .await?;
        let status = res.status().as_u16();
        let body = ApiClient::decode::<EmbeddingStatus>(res).await?;

        if let Some(error) = &body.error {
            return Err(ClientError::remote(Some(status), error));
        }

        return Ok(body);
    }

    #[allow(clippy::implicit_return)]
    async fn send_message(
        &self,
        question: &str,
        document: Option<&Document>,
    ) -> Result<String, ClientError> {
        let req = match self.mode {
            ChatMode::Combined => {
                let document = match document {
                    Some(document) => document,
                    None => {
                        return Err(ClientError::validation("Please upload a PDF file first"))
                    }
                };
                let form = Form::new()
                    .text("user_question", question.to_string())
                    .part("file", document_part(document)?);

                self.client.post("/llm").multipart(form)
            }
            ChatMode::TwoPhase => {
                let body = ChatRequest {
                    user_question: question.to_string(),
                };

                self.client.post("/llm").json(&body)
            }
        };

        tracing::debug!(mode = %self.mode, "sending question");
        let res = self
            .client
            .send_authorized(req, "Failed to send message")
            .await?;
        let status = res.status().as_u16();
        let body = res.text().await?;

        return parse_answer(status, &body);
    }
}
