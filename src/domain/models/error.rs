use thiserror::Error;

/// Failures surfaced by every gateway. The variant decides what the caller
/// does with its state: validation errors never reach the network, an
/// unauthenticated error means the session is gone, and remote errors only
/// revert optimistic changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{message}")]
    Remote { status: Option<u16>, message: String },
}

impl ClientError {
    pub fn validation(message: &str) -> ClientError {
        return ClientError::Validation(message.to_string());
    }

    pub fn remote(status: Option<u16>, message: &str) -> ClientError {
        return ClientError::Remote {
            status,
            message: message.to_string(),
        };
    }

    pub fn is_unauthenticated(&self) -> bool {
        return matches!(self, ClientError::Unauthenticated(_));
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> ClientError {
        let status = err.status().map(|status| return status.as_u16());
        return ClientError::Remote {
            status,
            message: err.to_string(),
        };
    }
}
