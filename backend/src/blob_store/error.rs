//! Error types for blob storage operations

use thiserror::Error;

/// Result type for blob storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during blob storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Storage client is not usable (missing or invalid connection string)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Azure SDK or service error
    #[error("Azure storage error: {0}")]
    Azure(String),

    /// Backend refused to serve the request
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<azure_core::Error> for StorageError {
    fn from(error: azure_core::Error) -> Self {
        Self::Azure(error.to_string())
    }
}
