use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use super::{ExtractionResponse, TableExtractor};
use crate::domain::error::{AppError, Result};
use crate::domain::upload::UploadedFile;

/// Multipart field the extraction service reads the document from
pub const EXTRACTION_FILE_FIELD: &str = "file";

pub struct HttpTableExtractor {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTableExtractor {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl TableExtractor for HttpTableExtractor {
    async fn extract(&self, file: UploadedFile) -> Result<ExtractionResponse> {
        let UploadedFile {
            file_name,
            content_type,
            bytes,
        } = file;

        debug!(endpoint = %self.endpoint, file_name = %file_name, bytes = bytes.len(), "Forwarding file to extraction service");

        let mut part = Part::bytes(bytes).file_name(file_name);
        if let Some(content_type) = content_type.as_deref() {
            part = part.mime_str(content_type).map_err(|_| {
                AppError::ValidationError(format!("Invalid file content type: {}", content_type))
            })?;
        }
        let form = Form::new().part(EXTRACTION_FILE_FIELD, part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint = %self.endpoint, error = %e, "Extraction service request failed");
                AppError::UpstreamError(format!("Extraction service unreachable: {}", e))
            })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            AppError::UpstreamError(format!("Failed to read extraction response: {}", e))
        })?;

        Ok(ExtractionResponse {
            status,
            body: body.to_vec(),
        })
    }
}
