//! HTTP request handlers.

pub mod health;
pub mod videos;

pub use health::health;
pub use videos::{generate_thumbnail, get_thumbnail, upload_video};
