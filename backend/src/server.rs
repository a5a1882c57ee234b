use std::sync::Arc;

use aide::openapi::OpenApi;
use axum::{extract::DefaultBodyLimit, Extension, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{blob_store::BlobStore, routes, types::Environment};

/// Port used when `PORT` is not set
const DEFAULT_PORT: u16 = 8000;

/// Builds the application router with its dependencies attached
pub fn app(environment: &Environment, blob_store: Arc<dyn BlobStore>) -> Router {
    let mut openapi = OpenApi::default();
    let max_upload_bytes = environment.max_upload_bytes();

    routes::handler(environment)
        .finish_api(&mut openapi)
        .layer(Extension(Arc::new(openapi)))
        .layer(Extension(blob_store))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
}

/// Starts the server with the given environment and dependencies
///
/// Runs until the process is terminated.
///
/// # Errors
///
/// Returns an error if `PORT` is invalid or the server fails to bind to the port
pub async fn start(environment: Environment, blob_store: Arc<dyn BlobStore>) -> anyhow::Result<()> {
    let addr = std::net::SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(DEFAULT_PORT), |p| p.parse())?,
    ));

    let router = app(&environment, blob_store);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🔄 Image gallery started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .await
        .map_err(anyhow::Error::from)
}
