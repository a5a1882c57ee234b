use std::sync::Arc;

use axum::{Extension, Json};
use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    blob_store::BlobStore,
    object_key::object_key,
    types::{AppError, ImageUpload},
};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UploadResponse {
    /// Always `true` on success
    pub ok: bool,
    /// Public URL of the stored image
    pub url: String,
}

/// Stores the image sent in the `file` part of a multipart form
///
/// The object key is the current UTC time (`YYYYMMDDTHHMMSS`) joined with the
/// sanitized client filename. An existing object with the same key is replaced.
///
/// # Errors
///
/// - `400` when the `file` part is missing or its filename is empty
/// - `500` when the storage backend rejects the write
#[instrument(skip_all)]
pub async fn handler(
    Extension(blob_store): Extension<Arc<dyn BlobStore>>,
    ImageUpload(file): ImageUpload,
) -> Result<Json<UploadResponse>, AppError> {
    let key = object_key(Utc::now(), &file.file_name);

    tracing::info!(
        key = %key,
        content_type = %file.content_type,
        size = file.bytes.len(),
        "Storing uploaded image"
    );

    let url = blob_store
        .put_object(&key, file.bytes, &file.content_type)
        .await?;

    Ok(Json(UploadResponse { ok: true, url }))
}
