#[cfg(test)]
#[path = "document_test.rs"]
mod tests;

use std::path::Path;

use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::fs;

use super::ClientError;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// A file picked by the user for upload or questioning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Document {
        let media_type = mime_guess::from_path(file_name)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();

        return Document {
            file_name: file_name.to_string(),
            media_type,
            bytes,
        };
    }

    pub async fn open(path: &Path) -> Result<Document> {
        let bytes = fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| return name.to_string_lossy().to_string())
            .unwrap_or_else(|| return path.to_string_lossy().to_string());

        return Ok(Document::new(&file_name, bytes));
    }

    pub fn is_pdf(&self) -> bool {
        return self.media_type == PDF_MEDIA_TYPE;
    }

    /// Uploads are restricted to PDFs. Callers run this before handing the
    /// document to a gateway.
    pub fn ensure_pdf(&self) -> Result<(), ClientError> {
        if !self.is_pdf() {
            return Err(ClientError::validation("Please upload a PDF file"));
        }

        return Ok(());
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadResult {
    pub success: bool,
    pub message: String,
    pub file_id: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: Option<bool>,
    pub message: Option<String>,
    #[serde(rename = "fileId")]
    pub file_id: Option<String>,
}

impl UploadResponse {
    pub fn into_result(self, file_name: &str) -> UploadResult {
        return UploadResult {
            success: self.success.unwrap_or(true),
            message: self
                .message
                .unwrap_or_else(|| return format!("Uploaded {file_name}")),
            file_id: self.file_id,
        };
    }
}
