//! Blob storage for uploaded images
mod azure;
mod error;
#[cfg(any(test, feature = "test-utils"))]
mod memory;

use async_trait::async_trait;
use bytes::Bytes;

pub use azure::AzureBlobStore;
pub use error::{StorageError, StorageResult};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::{InMemoryBlobStore, StoredObject};

/// Container-scoped object storage used by the HTTP layer
///
/// Implementations are shared across concurrent requests behind an `Arc`.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Creates the backing container with public read access if it does not exist yet
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be reached or rejects the request
    async fn ensure_container(&self) -> StorageResult<()>;

    /// Stores `bytes` under `key`, replacing any existing object, and returns its URL
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the write
    async fn put_object(&self, key: &str, bytes: Bytes, content_type: &str)
        -> StorageResult<String>;

    /// Lists the URL of every object in the container, in backend listing order
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the listing fails
    async fn list_object_urls(&self) -> StorageResult<Vec<String>>;
}
