//! Backend selection.

use tracing::info;

use crate::error::{ReadOutcome, StorageError, StorageResult};
use crate::local::LocalStorage;
use crate::s3::S3Storage;

/// A concrete storage backend, chosen once at startup and never re-dispatched
/// per call on a configuration string.
#[derive(Clone)]
pub enum StorageBackend {
    Local(LocalStorage),
    S3(S3Storage),
}

impl StorageBackend {
    /// Select the backend from `STORAGE_BACKEND` (`local` | `s3`, default
    /// `s3`). An unknown value is a fatal configuration error.
    pub async fn from_env() -> StorageResult<Self> {
        let kind = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "s3".to_string());
        Self::from_kind(&kind).await
    }

    /// Build the backend named by `kind`, configuring it from the
    /// environment.
    pub async fn from_kind(kind: &str) -> StorageResult<Self> {
        match kind.to_lowercase().as_str() {
            "local" => {
                let storage = LocalStorage::from_env();
                info!("Using local filesystem storage backend");
                Ok(Self::Local(storage))
            }
            "s3" => {
                let storage = S3Storage::from_env().await?;
                info!("Using S3 storage backend");
                Ok(Self::S3(storage))
            }
            other => Err(StorageError::UnsupportedBackend(other.to_string())),
        }
    }

    pub async fn write_file(&self, path: &str, content: &[u8]) -> StorageResult<()> {
        match self {
            Self::Local(s) => s.write_file(path, content).await,
            Self::S3(s) => s.write_file(path, content).await,
        }
    }

    pub async fn read_file(&self, path: &str) -> StorageResult<ReadOutcome> {
        match self {
            Self::Local(s) => s.read_file(path).await,
            Self::S3(s) => s.read_file(path).await,
        }
    }

    pub async fn delete_file(&self, path: &str) -> StorageResult<()> {
        match self {
            Self::Local(s) => s.delete_file(path).await,
            Self::S3(s) => s.delete_file(path).await,
        }
    }

    pub async fn file_exists(&self, path: &str) -> StorageResult<bool> {
        match self {
            Self::Local(s) => s.file_exists(path).await,
            Self::S3(s) => s.file_exists(path).await,
        }
    }

    pub async fn directory_exists(&self, path: &str) -> StorageResult<bool> {
        match self {
            Self::Local(s) => s.directory_exists(path).await,
            Self::S3(s) => s.directory_exists(path).await,
        }
    }

    pub async fn delete_directory(&self, path: &str) -> StorageResult<()> {
        match self {
            Self::Local(s) => s.delete_directory(path).await,
            Self::S3(s) => s.delete_directory(path).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_backend_kind_is_fatal() {
        let result = StorageBackend::from_kind("ftp").await;

        assert!(matches!(
            result,
            Err(StorageError::UnsupportedBackend(ref kind)) if kind == "ftp"
        ));
    }

    #[tokio::test]
    async fn test_backend_kind_is_case_insensitive() {
        assert!(matches!(
            StorageBackend::from_kind("LOCAL").await,
            Ok(StorageBackend::Local(_))
        ));
    }
}
