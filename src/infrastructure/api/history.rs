#[cfg(test)]
#[path = "history_test.rs"]
mod tests;

use async_trait::async_trait;

use super::ApiClient;
use crate::domain::models::ChatSession;
use crate::domain::models::ClientError;
use crate::domain::models::HistoryGateway;
use crate::domain::models::HistoryResponse;

pub struct ApiHistory {
    client: ApiClient,
}

impl ApiHistory {
    pub fn new(client: ApiClient) -> ApiHistory {
        return ApiHistory { client };
    }
}

#[async_trait]
impl HistoryGateway for ApiHistory {
    #[allow(clippy::implicit_return)]
    async fn fetch_history(&self) -> Result<Vec<ChatSession>, ClientError> {
        let res = self
            .client
            .send_authorized(
                self.client
                    .get("/chat-history")
                    .header("Content-Type", "application/json"),
                "Failed to fetch chat history",
            )
            .await?;
        let body = ApiClient::decode::<HistoryResponse>(res).await?;
        tracing::debug!(sessions = body.sessions.len(), "history loaded");

        return Ok(body.sessions);
    }
}
