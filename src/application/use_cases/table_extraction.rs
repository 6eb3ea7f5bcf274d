use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::error::{AppError, Result};
use crate::domain::upload::UploadedFile;
use crate::infrastructure::extraction::TableExtractor;

pub const CSV_CONTENT_TYPE: &str = "text/csv";
pub const PLAIN_TEXT_CONTENT_TYPE: &str = "text/plain";

/// Response to hand back to the caller of the proxy
#[derive(Debug, Clone, PartialEq)]
pub struct RelayedResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

pub struct TableExtractionUseCase {
    extractor: Arc<dyn TableExtractor + Send + Sync>,
}

impl TableExtractionUseCase {
    pub fn new(extractor: Arc<dyn TableExtractor + Send + Sync>) -> Self {
        Self { extractor }
    }

    /// Single pass-through: 2xx becomes a 200 CSV reply, anything else is
    /// relayed with the remote status and body.
    pub async fn execute(&self, file: Option<UploadedFile>) -> Result<RelayedResponse> {
        let file = file.ok_or(AppError::MissingFile)?;
        let file_name = file.file_name.clone();

        let response = self.extractor.extract(file).await?;

        if response.is_success() {
            info!(file_name = %file_name, bytes = response.body.len(), "Table extracted");
            Ok(RelayedResponse {
                status: 200,
                content_type: CSV_CONTENT_TYPE,
                body: response.body,
            })
        } else {
            warn!(file_name = %file_name, status = response.status, "Extraction service returned an error");
            Ok(RelayedResponse {
                status: response.status,
                content_type: PLAIN_TEXT_CONTENT_TYPE,
                body: response.body,
            })
        }
    }
}
