use std::sync::Arc;

use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{blob_store::BlobStore, types::AppError};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GalleryResponse {
    /// Always `true` on success
    pub ok: bool,
    /// URL of every stored image, in storage listing order
    pub gallery: Vec<String>,
}

/// Lists the URLs of all stored images
#[instrument(skip_all)]
pub async fn handler(
    Extension(blob_store): Extension<Arc<dyn BlobStore>>,
) -> Result<Json<GalleryResponse>, AppError> {
    let gallery = blob_store.list_object_urls().await?;

    tracing::debug!("Gallery contains {} images", gallery.len());

    Ok(Json(GalleryResponse { ok: true, gallery }))
}
