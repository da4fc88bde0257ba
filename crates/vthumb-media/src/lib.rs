//! FFmpeg CLI wrapper for single-frame extraction.
//!
//! This crate provides:
//! - Type-safe building of the piped FFmpeg invocation
//! - Stdin/stdout piping with separate stderr capture
//! - A bounded execution deadline with kill-on-expiry

pub mod command;
pub mod error;
pub mod thumbnail;

pub use command::{check_ffmpeg, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use thumbnail::extract_frame;
