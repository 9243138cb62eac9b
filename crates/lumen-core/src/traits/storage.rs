//! Storage provider trait for uploaded files.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::AppResult;

/// Trait for file storage backends holding payment proofs and QR codes.
///
/// Paths are relative, slash-separated, and idempotently overwritable:
/// writing the same path twice replaces the previous content.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write bytes to the given path, replacing any existing content.
    async fn write(&self, path: &str, data: Bytes) -> AppResult<()>;

    /// Read a file into memory as a complete byte vector.
    async fn read(&self, path: &str) -> AppResult<Bytes>;

    /// Delete a file at the given path.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Whether a file exists at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;

    /// Public URL under which the stored file is served.
    fn public_url(&self, path: &str) -> String;
}
