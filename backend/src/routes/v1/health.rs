use axum::Json;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct HealthResponse {
    /// Always `healthy` while the process is serving
    pub status: String,
}

/// Health check endpoint
///
/// Answers without touching the storage backend.
#[allow(clippy::unused_async)]
pub async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
