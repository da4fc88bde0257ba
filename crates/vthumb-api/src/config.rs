//! API configuration.

use vthumb_models::Resolution;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Max request body size
    pub max_body_size: usize,
    /// Deadline for a single frame-extraction process, in seconds
    pub extraction_timeout_secs: u64,
    /// Resolution used when a thumbnail request does not name one
    pub default_resolution: Resolution,
    /// Resolutions a thumbnail request may ask for
    pub allowed_resolutions: Vec<Resolution>,
    /// Environment (development/production)
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["*".to_string()],
            max_body_size: 500 * 1024 * 1024, // 500MB, uploads are whole videos
            extraction_timeout_secs: 30,
            default_resolution: Resolution::new(320, 240),
            allowed_resolutions: vec![
                Resolution::new(320, 240),
                Resolution::new(640, 480),
                Resolution::new(1280, 720),
            ],
            environment: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_size),
            extraction_timeout_secs: std::env::var("EXTRACTION_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.extraction_timeout_secs),
            default_resolution: std::env::var("DEFAULT_RESOLUTION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.default_resolution),
            allowed_resolutions: std::env::var("ALLOWED_RESOLUTIONS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .filter_map(|r| r.trim().parse().ok())
                        .collect()
                })
                .unwrap_or(defaults.allowed_resolutions),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Whether the resolution is on the configured allow-list.
    pub fn is_resolution_allowed(&self, resolution: Resolution) -> bool {
        self.allowed_resolutions.contains(&resolution)
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolution_is_allowed() {
        let config = ApiConfig::default();
        assert!(config.is_resolution_allowed(config.default_resolution));
        assert!(!config.is_resolution_allowed(Resolution::new(1, 1)));
    }
}
