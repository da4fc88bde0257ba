//! Storage path naming.
//!
//! Maps public asset identifiers to storage paths/keys, decoupling the
//! identifiers handed to clients from the internal storage layout. Lookups
//! take identifiers as opaque strings: an identifier that was never issued
//! simply derives a path that does not exist.

/// Root prefix for uploaded videos.
pub const UPLOAD_DIR: &str = "uploads";

/// Root prefix for extracted thumbnails.
pub const THUMBNAIL_DIR: &str = "thumbnails";

/// Storage path for a video with the given identifier and container extension.
pub fn video_path(file_id: &str, extension: &str) -> String {
    format!("{UPLOAD_DIR}/{file_id}.{extension}")
}

/// Storage path for a thumbnail with the given identifier.
pub fn thumbnail_path(thumbnail_id: &str) -> String {
    format!("{THUMBNAIL_DIR}/{thumbnail_id}.jpg")
}

/// Display filename suggested when serving a thumbnail.
pub fn thumbnail_filename(thumbnail_id: &str) -> String {
    format!("{thumbnail_id}.jpg")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AssetId;

    #[test]
    fn test_video_path() {
        assert_eq!(video_path("abc", "mp4"), "uploads/abc.mp4");
    }

    #[test]
    fn test_thumbnail_path() {
        let id = AssetId::new().to_string();
        assert_eq!(thumbnail_path(&id), format!("thumbnails/{id}.jpg"));
        assert_eq!(thumbnail_filename(&id), format!("{id}.jpg"));
    }
}
