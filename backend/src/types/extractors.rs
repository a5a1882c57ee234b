//! Custom extractors for upload requests

use aide::operation::OperationInput;
use axum::extract::{FromRequest, Multipart, Request};
use bytes::Bytes;

use crate::types::error::AppError;

/// Multipart field carrying the uploaded file
pub const FILE_FIELD: &str = "file";

/// Rejection message when the request has no `file` part
pub const NO_FILE_PART: &str = "No file part";

/// Rejection message when the `file` part has an empty filename
pub const NO_SELECTED_FILE: &str = "No selected file";

/// File received in the `file` part of a multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename as sent by the client, not sanitized
    pub file_name: String,
    /// Declared content type of the part
    pub content_type: String,
    /// File content
    pub bytes: Bytes,
}

/// Extracts the `file` part of a `multipart/form-data` body
///
/// Requests that are not multipart, or whose `file` part carries no filename,
/// are rejected as [`NO_FILE_PART`]. An empty filename is rejected as
/// [`NO_SELECTED_FILE`].
pub struct ImageUpload(pub UploadedFile);

impl<S> FromRequest<S> for ImageUpload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("Upload is not a multipart form: {rejection}");
                AppError::bad_request(NO_FILE_PART)
            })?;

        while let Some(field) = multipart.next_field().await? {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }

            // A part without a filename is a plain form value, not a file
            let Some(file_name) = field.file_name().map(ToString::to_string) else {
                continue;
            };

            if file_name.is_empty() {
                return Err(AppError::bad_request(NO_SELECTED_FILE));
            }

            let content_type = field
                .content_type()
                .map_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string(), ToString::to_string);
            let bytes = field.bytes().await?;

            return Ok(Self(UploadedFile {
                file_name,
                content_type,
                bytes,
            }));
        }

        Err(AppError::bad_request(NO_FILE_PART))
    }
}

// The multipart body is not described in the generated schema
impl OperationInput for ImageUpload {}
