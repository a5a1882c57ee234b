//! Image gallery backend: uploads images to Azure Blob Storage and lists them

/// Blob storage adapter
pub mod blob_store;

/// Storage key construction
pub mod object_key;

/// HTTP routes
pub mod routes;

/// Router assembly and serving
pub mod server;

/// Configuration, errors and extractors
pub mod types;
