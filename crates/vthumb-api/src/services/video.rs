//! Video upload and thumbnail pipeline.
//!
//! Orchestrates storage and frame extraction: resolve an uploaded video by
//! identifier, pipe its bytes through FFmpeg, and persist the resulting
//! image under a fresh identifier.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use vthumb_media::{extract_frame, MediaError};
use vthumb_models::{
    extension_of, thumbnail_filename, thumbnail_path, video_path, AssetId, Resolution, Timestamp,
    SUPPORTED_VIDEO_FORMATS,
};
use vthumb_storage::{ReadOutcome, StorageError, StorageService};

/// Result type for pipeline operations.
pub type VideoResult<T> = Result<T, VideoError>;

/// Failures a pipeline invocation can report.
///
/// Closed set: raw backend or process errors never cross this boundary
/// except as the `Storage` catch-all for backend faults during lookups.
#[derive(Debug, Error)]
pub enum VideoError {
    #[error("Video file not found")]
    SourceNotFound,

    #[error("Thumbnail file not found")]
    ThumbnailNotFound,

    #[error("Unsupported video format: {0}")]
    UnsupportedFormat(String),

    #[error("Frame extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Failed to persist {0}")]
    PersistenceFailed(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<MediaError> for VideoError {
    fn from(e: MediaError) -> Self {
        let message = match e.diagnostics() {
            Some(stderr) => format!("{e}: {}", stderr.trim_end()),
            None => e.to_string(),
        };
        Self::ExtractionFailed(message)
    }
}

/// The thumbnail pipeline.
///
/// Holds no per-request state; the shared [`StorageService`] binding is safe
/// for concurrent invocations since every write targets a path derived from
/// a freshly generated identifier.
#[derive(Clone)]
pub struct VideoService {
    storage: Arc<StorageService>,
    extraction_timeout_secs: u64,
}

impl VideoService {
    pub fn new(storage: Arc<StorageService>, extraction_timeout_secs: u64) -> Self {
        Self {
            storage,
            extraction_timeout_secs,
        }
    }

    /// Store an uploaded video under a fresh identifier.
    ///
    /// Returns the original filename and the generated identifier.
    pub async fn upload_video(&self, filename: &str, data: &[u8]) -> VideoResult<(String, AssetId)> {
        let extension = match extension_of(filename) {
            Some(ext) if SUPPORTED_VIDEO_FORMATS.contains(&ext.as_str()) => ext,
            _ => return Err(VideoError::UnsupportedFormat(filename.to_string())),
        };

        let file_id = AssetId::new();
        let path = video_path(&file_id.to_string(), &extension);

        if !self.storage.write_file(&path, data).await {
            return Err(VideoError::PersistenceFailed(path));
        }

        info!("Stored upload {} ({} bytes) at {}", filename, data.len(), path);
        Ok((filename.to_string(), file_id))
    }

    /// Extract one frame of the video `file_id` at `timestamp`, scaled to
    /// `resolution`, and store it as a new thumbnail.
    ///
    /// Every call mints a fresh thumbnail identifier; repeated requests
    /// against the same video produce independent thumbnails.
    pub async fn generate_thumbnail(
        &self,
        file_id: &str,
        timestamp: Timestamp,
        resolution: Resolution,
    ) -> VideoResult<AssetId> {
        let (payload, extension) = self.resolve_video(file_id).await?;

        let thumbnail_id = AssetId::new();

        let image = extract_frame(
            payload,
            &extension,
            timestamp,
            resolution,
            self.extraction_timeout_secs,
        )
        .await
        .map_err(|e| {
            warn!("Frame extraction failed for {file_id}: {e}");
            VideoError::from(e)
        })?;

        let path = thumbnail_path(&thumbnail_id.to_string());
        if !self.storage.write_file(&path, &image).await {
            return Err(VideoError::PersistenceFailed(path));
        }

        info!("Generated thumbnail {} for video {}", thumbnail_id, file_id);
        Ok(thumbnail_id)
    }

    /// Fetch a stored thumbnail: full JPEG payload plus a display filename.
    pub async fn get_thumbnail(&self, thumbnail_id: &str) -> VideoResult<(Vec<u8>, String)> {
        let path = thumbnail_path(thumbnail_id);

        if !self.storage.file_exists(&path).await? {
            return Err(VideoError::ThumbnailNotFound);
        }

        match self.storage.read_file(&path).await? {
            ReadOutcome::Found(bytes) => Ok((bytes, thumbnail_filename(thumbnail_id))),
            ReadOutcome::NotFound => Err(VideoError::ThumbnailNotFound),
        }
    }

    /// Probe the supported container extensions in order and read the first
    /// stored video that matches.
    ///
    /// A backend fault during probing surfaces as a storage error, never as
    /// absence, so an outage cannot masquerade as a missing video.
    async fn resolve_video(&self, file_id: &str) -> VideoResult<(Vec<u8>, String)> {
        for extension in SUPPORTED_VIDEO_FORMATS {
            let path = video_path(file_id, extension);
            if !self.storage.file_exists(&path).await? {
                continue;
            }
            return match self.storage.read_file(&path).await? {
                ReadOutcome::Found(bytes) => Ok((bytes, extension.to_string())),
                // Deleted between the probe and the read
                ReadOutcome::NotFound => Err(VideoError::SourceNotFound),
            };
        }
        Err(VideoError::SourceNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vthumb_storage::{LocalStorage, StorageBackend};

    fn service() -> (TempDir, VideoService) {
        let dir = TempDir::new().expect("tempdir");
        let backend = StorageBackend::Local(LocalStorage::new(dir.path()));
        let storage = Arc::new(StorageService::new(backend));
        (dir, VideoService::new(storage, 30))
    }

    #[tokio::test]
    async fn test_upload_rejects_unsupported_format() {
        let (_dir, service) = service();

        let err = service.upload_video("notes.txt", b"abc").await.unwrap_err();
        assert!(matches!(err, VideoError::UnsupportedFormat(_)));
    }

    #[tokio::test]
    async fn test_generate_for_unknown_id_is_source_not_found() {
        let (_dir, service) = service();

        let err = service
            .generate_thumbnail("ghost", Timestamp::from_secs(1), Resolution::new(320, 240))
            .await
            .unwrap_err();
        assert!(matches!(err, VideoError::SourceNotFound));
    }

    #[tokio::test]
    async fn test_get_unknown_thumbnail_is_not_found() {
        let (_dir, service) = service();

        let err = service.get_thumbnail("ghost").await.unwrap_err();
        assert!(matches!(err, VideoError::ThumbnailNotFound));
    }
}
