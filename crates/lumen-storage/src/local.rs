//! Local filesystem storage provider.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use lumen_core::config::storage::StorageConfig;
use lumen_core::error::{AppError, ErrorKind};
use lumen_core::error::AppResult;
use lumen_core::traits::storage::StorageProvider;

/// Local filesystem storage provider.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    /// Root directory for all stored files.
    root: PathBuf,
    /// Public base URL prefix for served files.
    public_base_url: String,
}

impl LocalStorageProvider {
    /// Create a new local storage provider from configuration.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a relative path to an absolute path within the root.
    ///
    /// Rejects traversal components so a crafted path cannot escape.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let clean = path.trim_start_matches('/');
        if clean
            .split('/')
            .any(|part| part == ".." || part.is_empty())
        {
            return Err(AppError::validation(format!("Invalid storage path: {path}")));
        }
        Ok(self.root.join(clean))
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.exists() && self.root.is_dir())
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        self.ensure_parent(&full_path).await?;
        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write file: {path}"),
                e,
            )
        })?;
        debug!(path, bytes = data.len(), "Stored file");
        Ok(())
    }

    async fn read(&self, path: &str) -> AppResult<Bytes> {
        let full_path = self.resolve(path)?;
        let data = fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {path}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read file: {path}"),
                    e,
                )
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete file: {path}"),
                e,
            )),
        }
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        let full_path = self.resolve(path)?;
        Ok(full_path.exists())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn provider() -> LocalStorageProvider {
        let dir = std::env::temp_dir().join(format!("lumen-storage-test-{}", uuid::Uuid::new_v4()));
        LocalStorageProvider::new(&StorageConfig {
            root_path: dir.to_string_lossy().into_owned(),
            public_base_url: "/files".to_string(),
            max_upload_bytes: 1024,
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn write_read_overwrite_delete() {
        let storage = provider().await;

        storage
            .write("proofs/a.png", Bytes::from_static(b"first"))
            .await
            .unwrap();
        assert_eq!(storage.read("proofs/a.png").await.unwrap().as_ref(), b"first");

        // Overwrite is idempotent replacement.
        storage
            .write("proofs/a.png", Bytes::from_static(b"second"))
            .await
            .unwrap();
        assert_eq!(
            storage.read("proofs/a.png").await.unwrap().as_ref(),
            b"second"
        );

        storage.delete("proofs/a.png").await.unwrap();
        assert!(!storage.exists("proofs/a.png").await.unwrap());
        // Deleting a missing file is not an error.
        storage.delete("proofs/a.png").await.unwrap();
    }

    #[tokio::test]
    async fn rejects_path_traversal() {
        let storage = provider().await;
        assert!(
            storage
                .write("../escape.png", Bytes::from_static(b"x"))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn public_url_joins_base() {
        let storage = provider().await;
        assert_eq!(storage.public_url("qr/events/e.png"), "/files/qr/events/e.png");
    }
}
