//! Environment configuration for different deployment stages

use std::env;

use tracing::Level;

/// Container used when `AZURE_STORAGE_CONTAINER` is not set
const DEFAULT_CONTAINER_NAME: &str = "lanternfly-images";

/// Upload body limit when `MAX_UPLOAD_BYTES` is not set (16 MiB)
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (local runs, Azurite)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Azure storage connection string, `None` when unset or blank
    #[must_use]
    pub fn azure_connection_string(&self) -> Option<String> {
        env::var("AZURE_STORAGE_CONNECTION_STRING")
            .ok()
            .filter(|value| !value.trim().is_empty())
    }

    /// Returns the blob container name for the environment
    #[must_use]
    pub fn container_name(&self) -> String {
        env::var("AZURE_STORAGE_CONTAINER")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONTAINER_NAME.to_string())
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development | Self::Staging)
    }

    /// Whether logs are emitted as JSON
    #[must_use]
    pub const fn json_logs(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }

    /// Maximum accepted request body size for uploads, in bytes
    #[must_use]
    pub fn max_upload_bytes(&self) -> usize {
        env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }

    #[must_use]
    pub fn tracing_level(&self) -> Level {
        env::var("TRACING_LEVEL")
            .ok()
            .and_then(|val| val.parse::<Level>().ok())
            .unwrap_or(match self {
                Self::Production | Self::Staging => Level::INFO,
                Self::Development => Level::DEBUG,
            })
    }
}
