//! Supported video container formats.

/// Container extensions the service accepts, in the order they are probed
/// when resolving an uploaded video by identifier.
pub const SUPPORTED_VIDEO_FORMATS: [&str; 7] = ["mp4", "mkv", "flv", "avi", "mov", "wmv", "webm"];

/// Extract the lowercase extension of a filename, if it has one.
pub fn extension_of(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Whether the filename carries a supported video container extension.
pub fn is_supported_video_format(filename: &str) -> bool {
    match extension_of(filename) {
        Some(ext) => SUPPORTED_VIDEO_FORMATS.contains(&ext.as_str()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_formats() {
        assert!(is_supported_video_format("clip.mp4"));
        assert!(is_supported_video_format("CLIP.MKV"));
        assert!(is_supported_video_format("a.b.webm"));
    }

    #[test]
    fn test_unsupported_formats() {
        assert!(!is_supported_video_format("notes.txt"));
        assert!(!is_supported_video_format("noextension"));
        assert!(!is_supported_video_format(".mp4"));
        assert!(!is_supported_video_format("trailing."));
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("clip.MP4").as_deref(), Some("mp4"));
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension_of("plain"), None);
    }
}
