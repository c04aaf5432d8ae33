use anyhow::Result;

use super::RouteGuard;
use crate::domain::models::Route;
use crate::domain::models::RouteClass;
use crate::domain::models::RouteDecision;
use crate::domain::services::SessionStore;
use crate::infrastructure::storage::LocalStorage;

fn store(token: Option<&str>) -> Result<(tempfile::TempDir, SessionStore)> {
    let tmp_dir = tempfile::tempdir()?;
    let store = SessionStore::load(LocalStorage::new(tmp_dir.path().join("storage.json")))?;
    if let Some(token) = token {
        store.set_token(token)?;
    }

    return Ok((tmp_dir, store));
}

#[test]
fn it_decides_on_token_presence() {
    assert_eq!(
        RouteGuard::decide(false, RouteClass::Protected),
        RouteDecision::Redirect(Route::Login)
    );
    assert_eq!(
        RouteGuard::decide(true, RouteClass::Protected),
        RouteDecision::Allow
    );
    assert_eq!(
        RouteGuard::decide(true, RouteClass::PublicOnly),
        RouteDecision::Redirect(Route::Chat)
    );
    assert_eq!(
        RouteGuard::decide(false, RouteClass::PublicOnly),
        RouteDecision::Allow
    );
}

#[test]
fn it_sends_anonymous_users_to_login() -> Result<()> {
    let (_tmp_dir, session) = store(None)?;

    for route in [Route::Chat, Route::History, Route::Upload, Route::Profile] {
        assert_eq!(
            RouteGuard::check(&session, route),
            RouteDecision::Redirect(Route::Login)
        );
    }
    assert_eq!(
        RouteGuard::check(&session, Route::Signup),
        RouteDecision::Allow
    );
    return Ok(());
}

#[test]
fn it_sends_logged_in_users_to_chat() -> Result<()> {
    let (_tmp_dir, session) = store(Some("abc"))?;

    assert_eq!(
        RouteGuard::check(&session, Route::Login),
        RouteDecision::Redirect(Route::Chat)
    );
    assert_eq!(
        RouteGuard::check(&session, Route::History),
        RouteDecision::Allow
    );
    return Ok(());
}

#[test]
fn it_resolves_root() -> Result<()> {
    let (_tmp_dir, anonymous) = store(None)?;
    assert_eq!(RouteGuard::resolve(&anonymous, Route::Root), Route::Login);

    let (_tmp_dir, authenticated) = store(Some("abc"))?;
    assert_eq!(RouteGuard::resolve(&authenticated, Route::Root), Route::Chat);
    return Ok(());
}
