use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    pub email: String,
}

/// Authentication state of the client. A user is only ever known while a
/// token is held.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn with_token(token: &str) -> Session {
        return Session {
            token: Some(token.to_string()),
            user: None,
        };
    }

    pub fn is_authenticated(&self) -> bool {
        return self.token.is_some();
    }
}
