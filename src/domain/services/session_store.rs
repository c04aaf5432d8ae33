#[cfg(test)]
#[path = "session_store_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use parking_lot::RwLock;

use crate::domain::models::Session;
use crate::domain::models::User;
use crate::infrastructure::storage::LocalStorage;

pub const TOKEN_STORAGE_KEY: &str = "token";

/// Shared handle over the client's authentication state. Clones observe the
/// same session. The token is mirrored to local storage so it survives a
/// restart; the user profile only lives in memory.
#[derive(Clone)]
pub struct SessionStore {
    session: Arc<RwLock<Session>>,
    storage: LocalStorage,
}

impl SessionStore {
    /// Seeds the in-memory session from whatever token was persisted last.
    pub fn load(storage: LocalStorage) -> Result<SessionStore> {
        let mut session = Session::default();
        if let Some(token) = storage.get_item(TOKEN_STORAGE_KEY)? {
            if !token.is_empty() {
                session.token = Some(token);
            }
        }

        tracing::debug!(
            authenticated = session.is_authenticated(),
            path = ?storage.file_path,
            "session loaded"
        );

        return Ok(SessionStore {
            session: Arc::new(RwLock::new(session)),
            storage,
        });
    }

    pub fn snapshot(&self) -> Session {
        return self.session.read().clone();
    }

    pub fn token(&self) -> Option<String> {
        return self.session.read().token.clone();
    }

    pub fn user(&self) -> Option<User> {
        return self.session.read().user.clone();
    }

    pub fn is_authenticated(&self) -> bool {
        return self.session.read().is_authenticated();
    }

    /// Persists first so memory never holds a token that would be lost on
    /// restart.
    pub fn set_token(&self, token: &str) -> Result<()> {
        self.storage.set_item(TOKEN_STORAGE_KEY, token)?;

        let mut session = self.session.write();
        if session.token.as_deref() != Some(token) {
            session.user = None;
        }
        session.token = Some(token.to_string());

        return Ok(());
    }

    pub fn set_user(&self, user: User) {
        let mut session = self.session.write();
        if session.token.is_none() {
            tracing::warn!("ignoring user profile without a session token");
            return;
        }

        session.user = Some(user);
    }

    /// Drops the token and user. Always succeeds in memory; a storage failure
    /// is only logged.
    pub fn clear_token(&self) {
        {
            let mut session = self.session.write();
            *session = Session::default();
        }

        if let Err(err) = self.storage.remove_item(TOKEN_STORAGE_KEY) {
            tracing::warn!(err = ?err, "failed to remove persisted token");
        }
    }
}
