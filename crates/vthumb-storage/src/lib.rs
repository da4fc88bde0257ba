//! Pluggable storage for videos and thumbnails.
//!
//! This crate provides:
//! - A local filesystem backend and an S3-compatible object storage backend
//!   behind one capability set (write, read, delete, exists,
//!   directory-exists, directory-delete)
//! - Backend selection once at startup via `STORAGE_BACKEND`
//! - A fault-isolating [`StorageService`] façade

pub mod backend;
pub mod error;
pub mod local;
pub mod s3;
pub mod service;

pub use backend::StorageBackend;
pub use error::{ReadOutcome, StorageError, StorageResult};
pub use local::LocalStorage;
pub use s3::{S3Config, S3Storage};
pub use service::StorageService;
