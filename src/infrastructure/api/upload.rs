#[cfg(test)]
#[path = "upload_test.rs"]
mod tests;

use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::multipart::Part;

use super::ApiClient;
use crate::domain::models::ClientError;
use crate::domain::models::Document;
use crate::domain::models::UploadGateway;
use crate::domain::models::UploadResponse;
use crate::domain::models::UploadResult;

pub fn document_part(document: &Document) -> Result<Part, ClientError> {
    let part = Part::bytes(document.bytes.clone())
        .file_name(document.file_name.to_string())
        .mime_str(&document.media_type)?;

    return Ok(part);
}

pub struct ApiUpload {
    client: ApiClient,
}

impl ApiUpload {
    pub fn new(client: ApiClient) -> ApiUpload {
        return ApiUpload { client };
    }
}

#[async_trait]
impl UploadGateway for ApiUpload {
    #[allow(clippy::implicit_return)]
    async fn upload_file(&self, document: &Document) -> Result<UploadResult, ClientError> {
        let form = Form::new().part("file", document_part(document)?);

        tracing::debug!(
            file_name = %document.file_name,
            size = document.bytes.len(),
            "uploading document"
        );
        let res = self
            .client
            .send_authorized(
                self.client.post("/upload").multipart(form),
                "Failed to upload file",
            )
            .await?;
        let body = ApiClient::decode::<UploadResponse>(res).await?;

        return Ok(body.into_result(&document.file_name));
    }
}
