#[cfg(test)]
pub mod fake_service;
pub mod http_client;

use crate::domain::error::Result;
use crate::domain::upload::UploadedFile;
use async_trait::async_trait;

pub use http_client::HttpTableExtractor;

/// What the remote extraction service answered. The body is kept as raw
/// bytes, whatever charset the service used.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ExtractionResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait TableExtractor {
    /// Send the file to the extraction service. Non-2xx answers are not errors;
    /// only transport failures are.
    async fn extract(&self, file: UploadedFile) -> Result<ExtractionResponse>;
}
