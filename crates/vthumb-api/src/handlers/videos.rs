//! Video API handlers.

use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use vthumb_models::{Resolution, Timestamp};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Upload response.
#[derive(Serialize)]
pub struct VideoUploadResponse {
    /// Original name of the uploaded video file
    pub filename: String,
    /// Generated unique ID for the uploaded video file
    pub file_id: String,
}

/// Thumbnail generation request.
#[derive(Deserialize)]
pub struct ThumbnailRequest {
    pub file_id: String,
    /// Offset from the start of the video, in whole seconds
    pub timestamp: u64,
    /// Output resolution; the configured default when omitted
    #[serde(default)]
    pub resolution: Option<Resolution>,
}

/// Thumbnail generation response.
#[derive(Serialize)]
pub struct ThumbnailResponse {
    pub thumbnail_id: String,
}

/// Handle video file uploads (multipart `file` field).
pub async fn upload_video(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<VideoUploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::bad_request("Missing filename on file field"))?;

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read file field: {e}")))?;

        let (filename, file_id) = state.videos.upload_video(&filename, &data).await?;

        return Ok(Json(VideoUploadResponse {
            filename,
            file_id: file_id.to_string(),
        }));
    }

    Err(ApiError::bad_request("Missing file field"))
}

/// Generate a thumbnail for an uploaded video.
pub async fn generate_thumbnail(
    State(state): State<AppState>,
    Json(request): Json<ThumbnailRequest>,
) -> ApiResult<Json<ThumbnailResponse>> {
    let resolution = request
        .resolution
        .unwrap_or(state.config.default_resolution);

    if !state.config.is_resolution_allowed(resolution) {
        return Err(ApiError::bad_request(format!(
            "Resolution {resolution} is not allowed"
        )));
    }

    info!(
        "Thumbnail requested for {} at {}s ({})",
        request.file_id, request.timestamp, resolution
    );

    let thumbnail_id = state
        .videos
        .generate_thumbnail(
            &request.file_id,
            Timestamp::from_secs(request.timestamp),
            resolution,
        )
        .await?;

    Ok(Json(ThumbnailResponse {
        thumbnail_id: thumbnail_id.to_string(),
    }))
}

/// Retrieve a thumbnail image as raw JPEG bytes.
pub async fn get_thumbnail(
    State(state): State<AppState>,
    Path(thumbnail_id): Path<String>,
) -> ApiResult<Response> {
    let (content, filename) = state.videos.get_thumbnail(&thumbnail_id).await?;

    Response::builder()
        .header(header::CONTENT_TYPE, "image/jpeg")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={filename}"),
        )
        .body(Body::from(content))
        .map_err(|e| ApiError::internal(format!("Failed to build response: {e}")))
}
