#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::ApiClient;
use crate::domain::models::AuthGateway;
use crate::domain::models::ClientError;
use crate::domain::models::LoginRequest;
use crate::domain::models::SignupRequest;
use crate::domain::models::SignupResponse;
use crate::domain::models::User;
use crate::domain::services::validation;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

pub struct ApiAuth {
    client: ApiClient,
}

impl ApiAuth {
    pub fn new(client: ApiClient) -> ApiAuth {
        return ApiAuth { client };
    }
}

#[async_trait]
impl AuthGateway for ApiAuth {
    #[allow(clippy::implicit_return)]
    async fn signup(
        &self,
        user_name: &str,
        email: &str,
        password: &str,
    ) -> Result<SignupResponse, ClientError> {
        validation::validate_signup(user_name, email, password)?;

        let req = SignupRequest {
            user_name: user_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        tracing::debug!(email = email, "signing up");
        let res = self
            .client
            .send_public(self.client.post("/signup").json(&req), "Signup failed")
            .await?;

        let body = res.text().await?;
        let mut created = match serde_json::from_str::<SignupResponse>(&body) {
            Ok(created) => created,
            Err(err) => {
                tracing::warn!(err = ?err, "signup succeeded with an unreadable body");
                SignupResponse::default()
            }
        };

        if created.user_name.is_empty() {
            created.user_name = user_name.to_string();
        }
        if created.email.is_empty() {
            created.email = email.to_string();
        }

        return Ok(created);
    }

    #[allow(clippy::implicit_return)]
    async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        validation::validate_login(email, password)?;

        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        tracing::debug!(email = email, "logging in");
        let res = self
            .client
            .send_public(self.client.post("/login").json(&req), "Login failed")
            .await?;
        let status = res.status().as_u16();
        let body = ApiClient::decode::<LoginResponse>(res).await?;

        let token = match body.token {
            Some(token) if !token.is_empty() => token,
            _ => {
                return Err(ClientError::remote(
                    Some(status),
                    "Login succeeded but no token was returned",
                ))
            }
        };

        if let Err(err) = self.client.session.set_token(&token) {
            tracing::error!(err = ?err, "failed to persist session token");
            return Err(ClientError::remote(
                None,
                &format!("Failed to store the session: {err}"),
            ));
        }

        return Ok(token);
    }

    #[allow(clippy::implicit_return)]
    async fn current_user(&self) -> Result<User, ClientError> {
        let res = self
            .client
            .send_authorized(self.client.get("/me"), "Failed to load your profile")
            .await?;
        let user = ApiClient::decode::<User>(res).await?;
        self.client.session.set_user(user.clone());

        return Ok(user);
    }

    fn logout(&self) {
        self.client.session.clear_token();
        tracing::debug!("logged out");
    }
}
