use anyhow::Result;
use serde_json::json;

use super::ApiHistory;
use crate::domain::models::ClientError;
use crate::domain::models::HistoryGateway;
use crate::infrastructure::api::test_session;
use crate::infrastructure::api::ApiClient;
use crate::infrastructure::api::SESSION_EXPIRED;

#[tokio::test]
async fn it_fetches_sessions_in_backend_order() -> Result<()> {
    let body = json!({
        "sessions": [
            {
                "_id": "new",
                "filename": "b.pdf",
                "messages": [
                    {"question": "Q2", "answer": "A2", "created_at": "2024-02-01T00:00:00"}
                ],
                "last_message": "2024-02-01T00:00:00"
            },
            {
                "_id": "old",
                "filename": "a.pdf",
                "messages": [],
                "last_message": "2024-01-01T00:00:00"
            }
        ]
    });

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chat-history")
        .match_header("Authorization", "Bearer abc")
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let (_tmp_dir, session) = test_session(Some("abc"))?;
    let history = ApiHistory::new(ApiClient::new(&server.url(), session));
    let sessions = history.fetch_history().await?;

    let ids = sessions
        .iter()
        .map(|session| return session.id.to_string())
        .collect::<Vec<String>>();
    assert_eq!(ids, vec!["new".to_string(), "old".to_string()]);
    assert_eq!(sessions[0].messages[0].question, "Q2");
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_treats_missing_sessions_as_empty() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chat-history")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let (_tmp_dir, session) = test_session(Some("abc"))?;
    let history = ApiHistory::new(ApiClient::new(&server.url(), session));

    assert!(history.fetch_history().await?.is_empty());
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_expires_session_on_unauthorized() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chat-history")
        .with_status(401)
        .with_body(r#"{"detail": "Invalid authentication credentials"}"#)
        .create_async()
        .await;

    let (_tmp_dir, session) = test_session(Some("abc"))?;
    let history = ApiHistory::new(ApiClient::new(&server.url(), session.clone()));
    let res = history.fetch_history().await;

    assert_eq!(
        res,
        Err(ClientError::Unauthenticated(SESSION_EXPIRED.to_string()))
    );
    assert_eq!(session.token(), None);
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_keeps_session_on_server_errors() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chat-history")
        .with_status(500)
        .with_body(r#"{"detail": "Error fetching chat history: timeout"}"#)
        .create_async()
        .await;

    let (_tmp_dir, session) = test_session(Some("abc"))?;
    let history = ApiHistory::new(ApiClient::new(&server.url(), session.clone()));
    let res = history.fetch_history().await;

    assert_eq!(
        res,
        Err(ClientError::remote(
            Some(500),
            "Error fetching chat history: timeout"
        ))
    );
    assert_eq!(session.token(), Some("abc".to_string()));
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_falls_back_to_default_message() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chat-history")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let (_tmp_dir, session) = test_session(Some("abc"))?;
    let history = ApiHistory::new(ApiClient::new(&server.url(), session));
    let res = history.fetch_history().await;

    assert_eq!(
        res,
        Err(ClientError::remote(Some(502), "Failed to fetch chat history"))
    );
    mock.assert_async().await;
    return Ok(());
}
