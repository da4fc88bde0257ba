//! Business logic services.

pub mod video;

pub use video::{VideoError, VideoResult, VideoService};
