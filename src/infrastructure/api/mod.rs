mod auth;
mod chat;
mod client;
mod history;
mod upload;

pub use auth::*;
pub use chat::*;
pub use client::*;
pub use history::*;
pub use upload::*;

#[cfg(test)]
pub(crate) fn test_session(
    token: Option<&str>,
) -> anyhow::Result<(tempfile::TempDir, crate::domain::services::SessionStore)> {
    use crate::domain::services::SessionStore;
    use crate::infrastructure::storage::LocalStorage;

    let tmp_dir = tempfile::tempdir()?;
    let session = SessionStore::load(LocalStorage::new(tmp_dir.path().join("storage.json")))?;
    if let Some(token) = token {
        session.set_token(token)?;
    }

    return Ok((tmp_dir, session));
}
