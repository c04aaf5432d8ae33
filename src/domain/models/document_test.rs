use std::io::Write;

use anyhow::Result;

use super::Document;
use super::UploadResponse;
use crate::domain::models::ClientError;

#[test]
fn it_detects_pdf_by_name() {
    let doc = Document::new("paper.pdf", vec![]);
    assert!(doc.is_pdf());
    assert!(doc.ensure_pdf().is_ok());
}

#[test]
fn it_rejects_other_media_types() {
    let doc = Document::new("notes.txt", b"hello".to_vec());
    assert_eq!(doc.media_type, "text/plain");
    assert_eq!(
        doc.ensure_pdf(),
        Err(ClientError::Validation("Please upload a PDF file".to_string()))
    );
}

#[tokio::test]
async fn it_opens_files_from_disk() -> Result<()> {
    let tmp_dir = tempfile::tempdir()?;
    let path = tmp_dir.path().join("doc.pdf");
    let mut file = std::fs::File::create(&path)?;
    file.write_all(b"%PDF-1.4")?;

    let doc = Document::open(&path).await?;

    assert_eq!(doc.file_name, "doc.pdf");
    assert_eq!(doc.bytes, b"%PDF-1.4".to_vec());
    assert!(doc.is_pdf());
    return Ok(());
}

#[test]
fn it_defaults_upload_response_fields() -> Result<()> {
    let res: UploadResponse =
        serde_json::from_str(r#"{"file Name": "doc.pdf", "saved path": "uploads/doc.pdf"}"#)?;
    let result = res.into_result("doc.pdf");

    assert!(result.success);
    assert_eq!(result.message, "Uploaded doc.pdf");
    assert_eq!(result.file_id, None);
    return Ok(());
}

#[test]
fn it_keeps_backend_upload_fields() -> Result<()> {
    let res: UploadResponse =
        serde_json::from_str(r#"{"success": false, "message": "Too big", "fileId": "f1"}"#)?;
    let result = res.into_result("doc.pdf");

    assert!(!result.success);
    assert_eq!(result.message, "Too big");
    assert_eq!(result.file_id, Some("f1".to_string()));
    return Ok(());
}
