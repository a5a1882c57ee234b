use std::sync::Arc;

use aide::{axum::ApiRouter, openapi::OpenApi, scalar::Scalar};
use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json,
};

/// OpenAPI document and Scalar UI, mounted only where API docs are shown
pub fn handler() -> ApiRouter {
    let scalar = Scalar::new("/openapi.json").with_title("Image Gallery Docs");

    ApiRouter::new()
        .route("/docs", scalar.axum_route())
        .route("/openapi.json", get(openapi_schema))
}

#[allow(clippy::unused_async)]
async fn openapi_schema(Extension(openapi): Extension<Arc<OpenApi>>) -> Response {
    Json(openapi.as_ref()).into_response()
}
