//! In-process [`BlobStore`] used by tests

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use super::{BlobStore, StorageError, StorageResult};

/// Object stored in memory together with its content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Raw object content
    pub bytes: Bytes,
    /// Content type the object was stored with
    pub content_type: String,
}

/// Blob store keeping every object in a sorted in-memory map
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    container_name: String,
    objects: RwLock<BTreeMap<String, StoredObject>>,
    container_created: AtomicBool,
    unavailable: AtomicBool,
    latency_ms: AtomicU64,
}

impl InMemoryBlobStore {
    /// Creates an empty store for `container_name`
    #[must_use]
    pub fn new(container_name: impl Into<String>) -> Self {
        Self {
            container_name: container_name.into(),
            ..Self::default()
        }
    }

    /// Makes every subsequent operation fail with `StorageError::Unavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Delays every subsequent operation by `latency`
    pub fn set_latency(&self, latency: Duration) {
        let millis = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self.latency_ms.store(millis, Ordering::SeqCst);
    }

    /// Whether `ensure_container` has run successfully
    #[must_use]
    pub fn container_created(&self) -> bool {
        self.container_created.load(Ordering::SeqCst)
    }

    /// Returns the object stored under `key`
    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    /// Returns every stored key in listing order
    pub async fn keys(&self) -> Vec<String> {
        self.objects.read().await.keys().cloned().collect()
    }

    fn object_url(&self, key: &str) -> String {
        format!("memory://{}/{key}", self.container_name)
    }

    async fn check_available(&self) -> StorageResult<()> {
        let latency_ms = self.latency_ms.load(Ordering::SeqCst);
        if latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(latency_ms)).await;
        }

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(format!(
                "container {} is unreachable",
                self.container_name
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn ensure_container(&self) -> StorageResult<()> {
        self.check_available().await?;
        self.container_created.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn put_object(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> StorageResult<String> {
        self.check_available().await?;
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(self.object_url(key))
    }

    async fn list_object_urls(&self) -> StorageResult<Vec<String>> {
        self.check_available().await?;
        Ok(self
            .objects
            .read()
            .await
            .keys()
            .map(|key| self.object_url(key))
            .collect())
    }
}
