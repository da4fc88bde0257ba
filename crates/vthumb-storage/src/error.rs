//! Storage error types.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to configure storage backend: {0}")]
    ConfigError(String),

    #[error("Unsupported storage backend: {0:?} (expected \"local\" or \"s3\")")]
    UnsupportedBackend(String),

    #[error("Write failed for {path}: {message}")]
    WriteFailed { path: String, message: String },

    #[error("Read failed for {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Delete failed for {path}: {message}")]
    DeleteFailed { path: String, message: String },

    #[error("List failed for prefix {prefix}: {message}")]
    ListFailed { prefix: String, message: String },

    #[error("Existence check failed for {path}: {message}")]
    ExistsFailed { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn write_failed(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::WriteFailed {
            path: path.into(),
            message: msg.into(),
        }
    }

    pub fn read_failed(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::ReadFailed {
            path: path.into(),
            message: msg.into(),
        }
    }

    pub fn delete_failed(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::DeleteFailed {
            path: path.into(),
            message: msg.into(),
        }
    }

    pub fn list_failed(prefix: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::ListFailed {
            prefix: prefix.into(),
            message: msg.into(),
        }
    }

    pub fn exists_failed(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::ExistsFailed {
            path: path.into(),
            message: msg.into(),
        }
    }
}

/// Outcome of reading a storage object.
///
/// Absence is a distinct, expected outcome; backend faults are reported as
/// `Err(StorageError)` and are never collapsed into an empty byte payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The object exists; here is its full content.
    Found(Vec<u8>),
    /// The backend positively confirmed the object does not exist.
    NotFound,
}

impl ReadOutcome {
    /// The content, if the object was found.
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            ReadOutcome::Found(bytes) => Some(bytes),
            ReadOutcome::NotFound => None,
        }
    }
}
