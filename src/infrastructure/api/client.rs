#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

use reqwest::RequestBuilder;
use reqwest::Response;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ClientError;
use crate::domain::services::SessionStore;

pub const SESSION_EXPIRED: &str = "Session expired. Please login again";
pub const LOGIN_REQUIRED: &str = "No authentication token, please login first";

/// Pulls a human readable message out of an error body. The backend answers
/// with `{"message": ...}` or FastAPI style `{"detail": ...}` where detail is
/// a string or a list of validation entries.
pub fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    if let Some(message) = value.get("message").and_then(|e| return e.as_str()) {
        if !message.is_empty() {
            return Some(message.to_string());
        }
    }

    match value.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => {
            return Some(detail.to_string());
        }
        Some(Value::Array(entries)) => {
            let messages = entries
                .iter()
                .filter_map(|entry| return entry.get("msg").and_then(|e| return e.as_str()))
                .collect::<Vec<&str>>();
            if messages.is_empty() {
                return None;
            }
            return Some(messages.join(", "));
        }
        _ => return None,
    }
}

/// HTTP plumbing shared by every gateway. Authorized requests carry the
/// session's bearer token, and a rejected token ends the session.
#[derive(Clone)]
pub struct ApiClient {
    url: String,
    http: reqwest::Client,
    pub session: SessionStore,
}

impl ApiClient {
    pub fn new(url: &str, session: SessionStore) -> ApiClient {
        return ApiClient {
            url: url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            session,
        };
    }

    pub fn from_config(session: SessionStore) -> ApiClient {
        return ApiClient::new(&Config::get(ConfigKey::ApiURL), session);
    }

    pub fn endpoint(&self, path: &str) -> String {
        return format!("{url}{path}", url = self.url);
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        return self.http.get(self.endpoint(path));
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        return self.http.post(self.endpoint(path));
    }

    pub fn bearer(&self) -> Result<String, ClientError> {
        match self.session.token() {
            Some(token) => return Ok(format!("Bearer {token}")),
            None => return Err(ClientError::Unauthenticated(LOGIN_REQUIRED.to_string())),
        }
    }

    async fn dispatch(&self, req: RequestBuilder) -> Result<Response, ClientError> {
        let res = req.send().await;
        match res {
            Ok(res) => return Ok(res),
            Err(err) => {
                tracing::error!(error = ?err, "backend is not reachable");
                return Err(ClientError::Remote {
                    status: None,
                    message: format!("Failed to reach the backend: {err}"),
                });
            }
        }
    }

    async fn into_remote_error(res: Response, fallback: &str) -> ClientError {
        let status = res.status().as_u16();
        let body = res.text().await.unwrap_or_default();
        let message = extract_message(&body).unwrap_or_else(|| return fallback.to_string());
        tracing::error!(status = status, message = %message, "backend request failed");

        return ClientError::Remote {
            status: Some(status),
            message,
        };
    }

    /// Sends a request that needs no session. A 401 here is an answer about
    /// the submitted credentials, so it never touches the session.
    pub async fn send_public(
        &self,
        req: RequestBuilder,
        fallback: &str,
    ) -> Result<Response, ClientError> {
        let res = self.dispatch(req).await?;
        if !res.status().is_success() {
            return Err(ApiClient::into_remote_error(res, fallback).await);
        }

        return Ok(res);
    }

    pub async fn send_authorized(
        &self,
        req: RequestBuilder,
        fallback: &str,
    ) -> Result<Response, ClientError> {
        let bearer = self.bearer()?;
        let res = self
            .dispatch(req.header("Authorization", bearer))
            .await?;

        if res.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("backend rejected the session token, clearing session");
            self.session.clear_token();
            return Err(ClientError::Unauthenticated(SESSION_EXPIRED.to_string()));
        }

        if !res.status().is_success() {
            return Err(ApiClient::into_remote_error(res, fallback).await);
        }

        return Ok(res);
    }

    pub async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, ClientError> {
        let status = res.status().as_u16();
        let body = res.text().await?;
        tracing::debug!(status = status, bytes = body.len(), "backend response");

        match serde_json::from_str::<T>(&body) {
            Ok(payload) => return Ok(payload),
            Err(err) => {
                tracing::error!(error = ?err, "unexpected backend payload");
                return Err(ClientError::Remote {
                    status: Some(status),
                    message: format!("Unexpected response from the backend: {err}"),
                });
            }
        }
    }
}
