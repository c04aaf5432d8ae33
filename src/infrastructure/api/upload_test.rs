use anyhow::Result;
use mockito::Matcher;

use super::ApiUpload;
use crate::domain::models::ClientError;
use crate::domain::models::Document;
use crate::domain::models::UploadGateway;
use crate::infrastructure::api::test_session;
use crate::infrastructure::api::ApiClient;

fn pdf() -> Document {
    return Document::new("report.pdf", b"%PDF-1.4 test".to_vec());
}

#[tokio::test]
async fn it_uploads_documents_as_multipart() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/upload")
        .match_header("Authorization", "Bearer abc")
        .match_header(
            "content-type",
            Matcher::Regex("multipart/form-data".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="file"; filename="report.pdf""#.to_string()),
            Matcher::Regex("%PDF-1.4 test".to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"success": true, "message": "File uploaded", "fileId": "f1"}"#)
        .create_async()
        .await;

    let (_tmp_dir, session) = test_session(Some("abc"))?;
    let upload = ApiUpload::new(ApiClient::new(&server.url(), session));
    let res = upload.upload_file(&pdf()).await?;

    assert!(res.success);
    assert_eq!(res.message, "File uploaded");
    assert_eq!(res.file_id, Some("f1".to_string()));
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_fails_without_retrying() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/upload")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let (_tmp_dir, session) = test_session(Some("abc"))?;
    let upload = ApiUpload::new(ApiClient::new(&server.url(), session.clone()));
    let res = upload.upload_file(&pdf()).await;

    assert_eq!(
        res.err(),
        Some(ClientError::remote(Some(500), "Failed to upload file"))
    );
    assert_eq!(session.token(), Some("abc".to_string()));
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_expires_session_on_rejected_upload() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/upload")
        .with_status(401)
        .create_async()
        .await;

    let (_tmp_dir, session) = test_session(Some("abc"))?;
    let upload = ApiUpload::new(ApiClient::new(&server.url(), session.clone()));
    let res = upload.upload_file(&pdf()).await;

    assert!(matches!(res, Err(ClientError::Unauthenticated(_))));
    assert_eq!(session.token(), None);
    mock.assert_async().await;
    return Ok(());
}
