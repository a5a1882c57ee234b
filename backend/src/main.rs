use std::sync::Arc;

use gallery_backend::{
    blob_store::{AzureBlobStore, BlobStore},
    server,
    types::Environment,
};
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(environment.tracing_level()).into())
        .from_env_lossy();

    // JSON logs for staging/production, human readable for development
    if environment.json_logs() {
        fmt().json().with_env_filter(env_filter).init();
    } else {
        fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("Starting image gallery in {:?} environment", environment);

    let connection_string = environment.azure_connection_string();
    if connection_string.is_none() {
        tracing::warn!(
            "AZURE_STORAGE_CONNECTION_STRING is not set, storage requests will fail until it is configured"
        );
    }

    let blob_store: Arc<dyn BlobStore> = Arc::new(AzureBlobStore::from_connection_string(
        connection_string.as_deref(),
        environment.container_name(),
    ));

    // Container setup is best effort: the server still starts and storage
    // errors are reported per request.
    match blob_store.ensure_container().await {
        Ok(()) => tracing::info!("✅ Storage container ready"),
        Err(e) => tracing::warn!("Could not prepare storage container: {e}"),
    }

    server::start(environment, blob_store).await
}
