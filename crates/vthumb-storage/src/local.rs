//! Local filesystem backend.

use std::fs::Metadata;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{ReadOutcome, StorageError, StorageResult};

/// Storage backend writing to the local filesystem.
///
/// Paths are resolved relative to a root directory (the process working
/// directory by default), so storage paths like `uploads/<id>.mp4` land
/// next to the service the same way object keys would in a bucket.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create a backend rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create from environment variables (`LOCAL_STORAGE_ROOT`, default `.`).
    pub fn from_env() -> Self {
        let root = std::env::var("LOCAL_STORAGE_ROOT").unwrap_or_else(|_| ".".to_string());
        Self::new(root)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    /// Write content, creating any missing parent directories first.
    pub async fn write_file(&self, path: &str, content: &[u8]) -> StorageResult<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::write_failed(path, e.to_string()))?;
        }
        tokio::fs::write(&full, content)
            .await
            .map_err(|e| StorageError::write_failed(path, e.to_string()))?;
        debug!("Wrote {} bytes to {}", content.len(), full.display());
        Ok(())
    }

    /// Read full content; a missing file is `ReadOutcome::NotFound`, any
    /// other I/O fault is an error.
    pub async fn read_file(&self, path: &str) -> StorageResult<ReadOutcome> {
        let full = self.resolve(path);
        match tokio::fs::read(&full).await {
            Ok(bytes) => Ok(ReadOutcome::Found(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ReadOutcome::NotFound),
            Err(e) => Err(StorageError::read_failed(path, e.to_string())),
        }
    }

    pub async fn delete_file(&self, path: &str) -> StorageResult<()> {
        let full = self.resolve(path);
        tokio::fs::remove_file(&full)
            .await
            .map_err(|e| StorageError::delete_failed(path, e.to_string()))?;
        Ok(())
    }

    /// Whether a regular file exists at the path.
    pub async fn file_exists(&self, path: &str) -> StorageResult<bool> {
        self.metadata_is(path, Metadata::is_file).await
    }

    /// Whether a directory exists at the path.
    pub async fn directory_exists(&self, path: &str) -> StorageResult<bool> {
        self.metadata_is(path, Metadata::is_dir).await
    }

    /// Recursively delete a directory and everything under it.
    pub async fn delete_directory(&self, path: &str) -> StorageResult<()> {
        let full = self.resolve(path);
        tokio::fs::remove_dir_all(&full)
            .await
            .map_err(|e| StorageError::delete_failed(path, e.to_string()))?;
        Ok(())
    }

    async fn metadata_is(&self, path: &str, check: fn(&Metadata) -> bool) -> StorageResult<bool> {
        let full = self.resolve(path);
        match tokio::fs::metadata(&full).await {
            Ok(metadata) => Ok(check(&metadata)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::exists_failed(path, e.to_string())),
        }
    }
}
