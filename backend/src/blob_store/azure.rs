//! Azure Blob Storage implementation of [`BlobStore`]

use async_trait::async_trait;
use azure_core::{error::ErrorKind, Url};
use azure_storage::{CloudLocation, ConnectionString};
use azure_storage_blobs::prelude::{ClientBuilder, ContainerClient, PublicAccess};
use bytes::Bytes;
use futures::TryStreamExt;
use tracing::{debug, info};

use super::{BlobStore, StorageError, StorageResult};

/// Endpoint suffix of the public Azure cloud
const PUBLIC_ENDPOINT_SUFFIX: &str = "core.windows.net";

/// Error code returned when creating a container that already exists
const CONTAINER_ALREADY_EXISTS: &str = "ContainerAlreadyExists";

/// Blob store backed by a single Azure storage container
pub struct AzureBlobStore {
    container_name: String,
    client: Result<ContainerClient, String>,
}

impl AzureBlobStore {
    /// Creates a store for `container_name` from an Azure storage connection string
    ///
    /// Construction never fails. A missing or invalid connection string is kept
    /// and reported as `StorageError::Config` by every storage operation.
    #[must_use]
    pub fn from_connection_string(
        connection_string: Option<&str>,
        container_name: impl Into<String>,
    ) -> Self {
        let container_name = container_name.into();
        let client = connection_string
            .ok_or_else(|| "AZURE_STORAGE_CONNECTION_STRING is not set".to_string())
            .and_then(|connection_string| container_client(connection_string, &container_name));

        if let Err(msg) = &client {
            tracing::warn!("Azure storage client unavailable: {msg}");
        }

        Self {
            container_name,
            client,
        }
    }

    /// Name of the container this store writes to
    #[must_use]
    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    fn client(&self) -> StorageResult<&ContainerClient> {
        self.client
            .as_ref()
            .map_err(|msg| StorageError::Config(msg.clone()))
    }
}

/// Builds a container client from any supported connection string form
///
/// Handles `UseDevelopmentStorage=true`, an explicit `BlobEndpoint`, an
/// `EndpointSuffix` for non-public clouds, and account key or SAS credentials.
fn container_client(
    connection_string: &str,
    container_name: &str,
) -> Result<ContainerClient, String> {
    let parsed = ConnectionString::new(connection_string)
        .map_err(|e| format!("invalid connection string: {e}"))?;

    if parsed.use_development_storage == Some(true) {
        debug!("Using the local storage emulator");
        return Ok(ClientBuilder::emulator().container_client(container_name));
    }

    let credentials = parsed
        .storage_credentials()
        .map_err(|e| format!("invalid connection string credentials: {e}"))?;

    let builder = match (parsed.blob_endpoint, parsed.account_name) {
        (Some(blob_endpoint), account_name) => {
            let url =
                Url::parse(blob_endpoint).map_err(|e| format!("invalid BlobEndpoint: {e}"))?;
            let account = match account_name {
                Some(account) => account.to_string(),
                None => account_from_endpoint(&url)?,
            };

            debug!("Using blob endpoint {blob_endpoint}");
            ClientBuilder::with_location(
                CloudLocation::Custom {
                    account,
                    uri: blob_endpoint.trim_end_matches('/').to_string(),
                },
                credentials,
            )
        }
        (None, Some(account)) => match parsed.endpoint_suffix {
            None | Some(PUBLIC_ENDPOINT_SUFFIX) => {
                ClientBuilder::new(account.to_string(), credentials)
            }
            Some(suffix) => {
                debug!("Using endpoint suffix {suffix}");
                ClientBuilder::with_location(
                    CloudLocation::Custom {
                        account: account.to_string(),
                        uri: format!("https://{account}.blob.{suffix}"),
                    },
                    credentials,
                )
            }
        },
        (None, None) => {
            return Err("connection string has neither AccountName nor BlobEndpoint".to_string())
        }
    };

    Ok(builder.container_client(container_name))
}

/// Account name of a blob endpoint without `AccountName`
///
/// Emulator endpoints carry it as the first path segment
/// (`http://127.0.0.1:10000/devstoreaccount1`), cloud endpoints as the first
/// host label (`https://acct.blob.core.windows.net`).
fn account_from_endpoint(url: &Url) -> Result<String, String> {
    let from_path = url
        .path_segments()
        .and_then(|mut segments| segments.next())
        .filter(|segment| !segment.is_empty());

    from_path
        .or_else(|| url.host_str().and_then(|host| host.split('.').next()))
        .filter(|account| !account.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| format!("cannot derive account name from BlobEndpoint {url}"))
}

fn is_container_already_exists(error: &azure_core::Error) -> bool {
    if let Some(http) = error.as_http_error() {
        return http.error_code() == Some(CONTAINER_ALREADY_EXISTS);
    }
    matches!(
        error.kind(),
        ErrorKind::HttpResponse { error_code: Some(code), .. } if code == CONTAINER_ALREADY_EXISTS
    )
}

#[async_trait]
impl BlobStore for AzureBlobStore {
    async fn ensure_container(&self) -> StorageResult<()> {
        let client = self.client()?;

        if client.exists().await? {
            debug!("Container {} already exists", self.container_name);
            return Ok(());
        }

        match client.create().public_access(PublicAccess::Container).await {
            Ok(_) => {
                info!("Created container {} with public read access", self.container_name);
                Ok(())
            }
            // Another instance created it between the existence check and the create call
            Err(e) if is_container_already_exists(&e) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn put_object(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> StorageResult<String> {
        let blob_client = self.client()?.blob_client(key);
        let size = bytes.len();

        blob_client
            .put_block_blob(bytes)
            .content_type(content_type.to_string())
            .await?;

        debug!("Uploaded {size} bytes to {key} in container {}", self.container_name);

        Ok(blob_client.url()?.to_string())
    }

    async fn list_object_urls(&self) -> StorageResult<Vec<String>> {
        let client = self.client()?;
        let container_url = client.url()?.to_string();
        let container_url = container_url.trim_end_matches('/');

        let mut pages = client.list_blobs().into_stream();
        let mut urls = Vec::new();
        while let Some(page) = pages.try_next().await? {
            urls.extend(
                page.blobs
                    .blobs()
                    .map(|blob| format!("{container_url}/{}", blob.name)),
            );
        }

        debug!("Listed {} objects in container {}", urls.len(), self.container_name);

        Ok(urls)
    }
}
