//! Application state.

use std::sync::Arc;

use vthumb_storage::{StorageBackend, StorageError, StorageService};

use crate::config::ApiConfig;
use crate::services::VideoService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub storage: Arc<StorageService>,
    pub videos: VideoService,
}

impl AppState {
    /// Create new application state, binding the storage backend once.
    ///
    /// An invalid `STORAGE_BACKEND` value fails here, at startup, not per
    /// request.
    pub async fn new(config: ApiConfig) -> Result<Self, StorageError> {
        let backend = StorageBackend::from_env().await?;
        let storage = Arc::new(StorageService::new(backend));
        let videos = VideoService::new(Arc::clone(&storage), config.extraction_timeout_secs);

        Ok(Self {
            config,
            storage,
            videos,
        })
    }
}
