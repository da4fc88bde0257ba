//! Fault-isolating storage façade.

use tracing::{error, warn};

use crate::backend::StorageBackend;
use crate::error::{ReadOutcome, StorageResult};

/// Thin façade over the bound [`StorageBackend`].
///
/// Write and delete faults are caught here and converted to a boolean
/// result, so callers above this layer reason only about booleans and byte
/// payloads, never backend-specific failure types. Reads and existence
/// checks pass their results straight through.
#[derive(Clone)]
pub struct StorageService {
    backend: StorageBackend,
}

impl StorageService {
    pub fn new(backend: StorageBackend) -> Self {
        Self { backend }
    }

    /// Write content; `true` on success.
    pub async fn write_file(&self, path: &str, content: &[u8]) -> bool {
        match self.backend.write_file(path, content).await {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to write file: {e}");
                false
            }
        }
    }

    /// Delete a file; `true` on success.
    pub async fn delete_file(&self, path: &str) -> bool {
        match self.backend.delete_file(path).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to delete file: {e}");
                false
            }
        }
    }

    pub async fn read_file(&self, path: &str) -> StorageResult<ReadOutcome> {
        self.backend.read_file(path).await
    }

    pub async fn file_exists(&self, path: &str) -> StorageResult<bool> {
        self.backend.file_exists(path).await
    }

    pub async fn directory_exists(&self, path: &str) -> StorageResult<bool> {
        self.backend.directory_exists(path).await
    }

    pub async fn delete_directory(&self, path: &str) -> StorageResult<()> {
        self.backend.delete_directory(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::LocalStorage;
    use tempfile::TempDir;

    fn service() -> (TempDir, StorageService) {
        let dir = TempDir::new().expect("tempdir");
        let backend = StorageBackend::Local(LocalStorage::new(dir.path()));
        (dir, StorageService::new(backend))
    }

    #[tokio::test]
    async fn test_write_and_read_pass_through() {
        let (_dir, service) = service();

        assert!(service.write_file("uploads/v.mp4", b"abc").await);
        assert!(service.file_exists("uploads/v.mp4").await.unwrap());
        assert_eq!(
            service.read_file("uploads/v.mp4").await.unwrap(),
            ReadOutcome::Found(b"abc".to_vec())
        );
    }

    #[tokio::test]
    async fn test_write_fault_becomes_false() {
        let (_dir, service) = service();

        // The parent "file.bin" is a regular file, so creating it as a
        // directory for the nested write must fail.
        assert!(service.write_file("file.bin", b"x").await);
        assert!(!service.write_file("file.bin/nested.bin", b"x").await);
    }

    #[tokio::test]
    async fn test_delete_fault_becomes_false() {
        let (_dir, service) = service();

        assert!(!service.delete_file("never-written.bin").await);
    }

    #[tokio::test]
    async fn test_read_missing_stays_typed() {
        let (_dir, service) = service();

        assert_eq!(
            service.read_file("absent.jpg").await.unwrap(),
            ReadOutcome::NotFound
        );
    }
}
