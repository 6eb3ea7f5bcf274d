use actix_multipart::Multipart;
use futures::StreamExt;
use tracing::warn;

use crate::domain::upload::UploadedFile;

/// Form field carrying the uploaded document
pub const FILE_FIELD: &str = "file";

/// Name used when the part carries no filename
const DEFAULT_FILE_NAME: &str = "blob";

/// Pull the first `file` field out of a multipart body.
///
/// Other fields are skipped. A body that is not multipart, or that breaks
/// off mid-stream, reads as no file at all.
pub async fn read_file_field(mut payload: Multipart) -> Option<UploadedFile> {
    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(e) => {
                warn!(error = %e, "Unreadable multipart body");
                return None;
            }
        };

        let (name, file_name) = match field.content_disposition() {
            Some(disposition) => (
                disposition.get_name().map(str::to_string),
                disposition.get_filename().map(str::to_string),
            ),
            None => (None, None),
        };
        let content_type = field.content_type().map(|mime| mime.to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(chunk) => bytes.extend_from_slice(&chunk),
                Err(e) => {
                    warn!(error = %e, "Multipart field ended early");
                    return None;
                }
            }
        }

        if name.as_deref() != Some(FILE_FIELD) {
            continue;
        }

        return Some(UploadedFile {
            file_name: file_name.unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
            content_type,
            bytes,
        });
    }

    None
}
