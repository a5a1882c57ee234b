use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use gallery_backend::{
    blob_store::{BlobStore, InMemoryBlobStore},
    server,
    types::Environment,
};
use tower::ServiceExt;

use super::utils::{multipart_body, Part, BOUNDARY};

pub const TEST_CONTAINER: &str = "lanternfly-images";

/// Setup test environment variables with all the required configuration
pub fn setup_test_env() {
    // Initialize tracing for tests
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

/// Router wired to an in-memory blob store
pub struct TestSetup {
    pub router: Router,
    pub blob_store: Arc<InMemoryBlobStore>,
}

impl TestSetup {
    pub fn new() -> Self {
        Self::with_environment(Environment::Development)
    }

    pub fn with_environment(environment: Environment) -> Self {
        setup_test_env();

        let blob_store = Arc::new(InMemoryBlobStore::new(TEST_CONTAINER));
        let shared: Arc<dyn BlobStore> = blob_store.clone();
        let router = server::app(&environment, shared);

        Self { router, blob_store }
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_multipart_request(
        &self,
        route: &str,
        parts: &[Part],
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_post_request(
        &self,
        route: &str,
        content_type: &str,
        body: impl Into<Body>,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .header("Content-Type", content_type)
            .body(body.into())?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    /// Uploads `bytes` as the `file` part and returns the JSON response body
    pub async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> serde_json::Value {
        let response = self
            .send_multipart_request(
                "/api/v1/upload",
                &[Part::file("file", file_name, Some(content_type), bytes)],
            )
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), http::StatusCode::OK);
        super::utils::parse_response_body(response).await
    }
}
