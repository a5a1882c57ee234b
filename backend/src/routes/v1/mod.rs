pub mod gallery;
pub mod health;
pub mod upload;

use aide::axum::{
    routing::{get, post},
    ApiRouter,
};

/// Creates the v1 API router with all v1 handler routes
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .api_route("/upload", post(upload::handler))
        .api_route("/gallery", get(gallery::handler))
        .api_route("/health", get(health::handler))
}
