//! Shared data models for the vthumb backend.
//!
//! This crate provides:
//! - Asset identifiers (opaque UUID tokens)
//! - Storage path naming for videos and thumbnails
//! - Supported container formats
//! - Timestamp and resolution value types

pub mod format;
pub mod id;
pub mod naming;
pub mod resolution;
pub mod timestamp;

// Re-export common types
pub use format::{extension_of, is_supported_video_format, SUPPORTED_VIDEO_FORMATS};
pub use id::AssetId;
pub use naming::{thumbnail_filename, thumbnail_path, video_path, THUMBNAIL_DIR, UPLOAD_DIR};
pub use resolution::{Resolution, ResolutionParseError};
pub use timestamp::Timestamp;
