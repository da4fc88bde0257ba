//! Thumbnail pipeline integration tests.
//!
//! Tests exercising real frame extraction shell out to ffmpeg and are
//! ignored by default; everything else runs against a local storage backend
//! in a temp directory.

use std::sync::Arc;

use tempfile::TempDir;

use vthumb_api::services::{VideoError, VideoService};
use vthumb_models::{video_path, Resolution, Timestamp};
use vthumb_storage::{LocalStorage, ReadOutcome, StorageBackend, StorageService};

fn pipeline() -> (TempDir, Arc<StorageService>, VideoService) {
    let dir = TempDir::new().expect("tempdir");
    let backend = StorageBackend::Local(LocalStorage::new(dir.path()));
    let storage = Arc::new(StorageService::new(backend));
    let videos = VideoService::new(Arc::clone(&storage), 30);
    (dir, storage, videos)
}

/// Synthesize a short FLV test clip (FLV muxes cleanly to a pipe).
async fn make_test_video() -> Vec<u8> {
    let output = tokio::process::Command::new("ffmpeg")
        .args([
            "-v",
            "error",
            "-f",
            "lavfi",
            "-i",
            "testsrc=size=320x240:rate=10:duration=2",
            "-f",
            "flv",
            "pipe:1",
        ])
        .output()
        .await
        .expect("failed to run ffmpeg");
    assert!(output.status.success(), "test clip generation failed");
    assert!(!output.stdout.is_empty());
    output.stdout
}

#[tokio::test]
async fn test_upload_round_trip() {
    let (_dir, storage, videos) = pipeline();

    let (filename, file_id) = videos.upload_video("clip.mp4", b"abc").await.unwrap();
    assert_eq!(filename, "clip.mp4");

    let path = video_path(&file_id.to_string(), "mp4");
    assert!(storage.file_exists(&path).await.unwrap());
    assert_eq!(
        storage.read_file(&path).await.unwrap(),
        ReadOutcome::Found(b"abc".to_vec())
    );
}

#[tokio::test]
async fn test_uploads_of_identical_bytes_get_distinct_ids() {
    let (_dir, _storage, videos) = pipeline();

    let (_, a) = videos.upload_video("clip.mp4", b"same").await.unwrap();
    let (_, b) = videos.upload_video("clip.mp4", b"same").await.unwrap();
    assert_ne!(a, b);
}

#[tokio::test]
async fn test_generate_for_missing_video_is_not_found() {
    let (dir, _storage, videos) = pipeline();

    let err = videos
        .generate_thumbnail("ghost", Timestamp::from_secs(1), Resolution::new(320, 240))
        .await
        .unwrap_err();
    assert!(matches!(err, VideoError::SourceNotFound));

    // No thumbnail object was created along the way.
    assert!(!dir.path().join("thumbnails").exists());
}

#[tokio::test]
async fn test_fetch_of_unknown_thumbnail_is_not_found() {
    let (_dir, _storage, videos) = pipeline();

    let err = videos.get_thumbnail("ghost").await.unwrap_err();
    assert!(matches!(err, VideoError::ThumbnailNotFound));
}

#[tokio::test]
#[ignore = "requires ffmpeg"]
async fn test_generate_and_fetch_thumbnail() {
    let (_dir, storage, videos) = pipeline();

    let clip = make_test_video().await;
    let (_, file_id) = videos.upload_video("clip.flv", &clip).await.unwrap();

    let thumbnail_id = videos
        .generate_thumbnail(
            &file_id.to_string(),
            Timestamp::from_secs(1),
            Resolution::new(320, 240),
        )
        .await
        .unwrap();

    let path = vthumb_models::thumbnail_path(&thumbnail_id.to_string());
    assert!(storage.file_exists(&path).await.unwrap());

    let (bytes, filename) = videos
        .get_thumbnail(&thumbnail_id.to_string())
        .await
        .unwrap();
    assert_eq!(filename, format!("{thumbnail_id}.jpg"));
    assert!(bytes.len() > 2);
    assert_eq!(&bytes[..2], &[0xFF, 0xD8], "expected JPEG magic bytes");
}

#[tokio::test]
#[ignore = "requires ffmpeg"]
async fn test_repeated_generation_mints_distinct_thumbnails() {
    let (_dir, _storage, videos) = pipeline();

    let clip = make_test_video().await;
    let (_, file_id) = videos.upload_video("clip.flv", &clip).await.unwrap();
    let file_id = file_id.to_string();

    let first = videos
        .generate_thumbnail(&file_id, Timestamp::from_secs(1), Resolution::new(320, 240))
        .await
        .unwrap();
    let second = videos
        .generate_thumbnail(&file_id, Timestamp::from_secs(1), Resolution::new(320, 240))
        .await
        .unwrap();

    assert_ne!(first, second);
    assert!(videos.get_thumbnail(&first.to_string()).await.is_ok());
    assert!(videos.get_thumbnail(&second.to_string()).await.is_ok());
}

#[tokio::test]
#[ignore = "requires ffmpeg"]
async fn test_timestamp_past_duration_fails() {
    let (_dir, _storage, videos) = pipeline();

    let clip = make_test_video().await;
    let (_, file_id) = videos.upload_video("clip.flv", &clip).await.unwrap();

    // The clip is 2 seconds long; seeking to an hour must fail rather than
    // hand back an identifier pointing at an empty object.
    let err = videos
        .generate_thumbnail(
            &file_id.to_string(),
            Timestamp::from_secs(3600),
            Resolution::new(320, 240),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, VideoError::ExtractionFailed(_)));
}
