//! S3-compatible object storage backend.
//!
//! A single fixed bucket holds every object; storage paths map directly to
//! object keys. There is no native directory concept, so directory
//! operations are emulated with key-prefix listings.

use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use aws_sdk_s3::Client;
use tracing::{debug, info};

use crate::error::{ReadOutcome, StorageError, StorageResult};

/// S3 bulk-delete requests carry at most this many keys.
const DELETE_BATCH_SIZE: usize = 1000;

/// Configuration for the S3 backend.
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Custom endpoint URL for S3-compatible providers (MinIO, R2, ...).
    /// `None` targets AWS S3 proper.
    pub endpoint_url: Option<String>,
    /// Explicit credentials; `None` falls back to the default provider chain.
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Bucket name
    pub bucket_name: String,
    /// Region
    pub region: String,
}

impl S3Config {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            endpoint_url: std::env::var("S3_ENDPOINT_URL").ok(),
            access_key_id: std::env::var("S3_ACCESS_KEY_ID").ok(),
            secret_access_key: std::env::var("S3_SECRET_ACCESS_KEY").ok(),
            bucket_name: std::env::var("S3_BUCKET_NAME")
                .unwrap_or_else(|_| "video-thumbnail-generator".to_string()),
            region: std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        }
    }
}

/// S3-compatible object storage backend.
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
    /// Cap on keys per listing page; `None` leaves the SDK default
    list_page_size: Option<i32>,
}

impl S3Storage {
    /// Create a new backend from configuration.
    pub async fn new(config: S3Config) -> StorageResult<Self> {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = Builder::from(&sdk_config);

        if let (Some(key), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            builder = builder.credentials_provider(Credentials::new(key, secret, None, None, "env"));
        }

        if let Some(ref endpoint) = config.endpoint_url {
            // S3-compatible providers generally require path-style addressing
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        let client = Client::from_conf(builder.build());

        info!("S3 storage bound to bucket {}", config.bucket_name);

        Ok(Self {
            client,
            bucket: config.bucket_name,
            list_page_size: None,
        })
    }

    /// Create from environment variables.
    pub async fn from_env() -> StorageResult<Self> {
        Self::new(S3Config::from_env()).await
    }

    /// Cap listing pages at `page_size` keys. Small pages force prefix
    /// listings to span multiple continuation-token round trips.
    pub fn with_list_page_size(mut self, page_size: i32) -> Self {
        self.list_page_size = Some(page_size);
        self
    }

    pub async fn write_file(&self, path: &str, content: &[u8]) -> StorageResult<()> {
        debug!("Putting {} bytes at {}", content.len(), path);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .body(ByteStream::from(content.to_vec()))
            .send()
            .await
            .map_err(|e| StorageError::write_failed(path, e.to_string()))?;

        Ok(())
    }

    /// Read full object content; a missing key is `ReadOutcome::NotFound`.
    pub async fn read_file(&self, path: &str) -> StorageResult<ReadOutcome> {
        debug!("Getting {}", path);

        let response = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    return Ok(ReadOutcome::NotFound);
                }
                return Err(StorageError::read_failed(path, e.to_string()));
            }
        };

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::read_failed(path, e.to_string()))?
            .into_bytes()
            .to_vec();

        Ok(ReadOutcome::Found(bytes))
    }

    pub async fn delete_file(&self, path: &str) -> StorageResult<()> {
        debug!("Deleting {}", path);

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| StorageError::delete_failed(path, e.to_string()))?;

        Ok(())
    }

    /// Whether an object exists at the key.
    ///
    /// Only a positive not-found from the backend reports `false`; any other
    /// fault is an error so callers cannot mistake an outage for absence.
    pub async fn file_exists(&self, path: &str) -> StorageResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                if e.as_service_error().is_some_and(|se| se.is_not_found()) {
                    Ok(false)
                } else {
                    Err(StorageError::exists_failed(path, e.to_string()))
                }
            }
        }
    }

    /// Whether at least one object exists under the prefix. A one-key page
    /// is enough to answer.
    pub async fn directory_exists(&self, prefix: &str) -> StorageResult<bool> {
        let response = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .max_keys(1)
            .send()
            .await
            .map_err(|e| StorageError::exists_failed(prefix, e.to_string()))?;

        Ok(response.key_count().unwrap_or(0) > 0)
    }

    /// Delete every object under the prefix, crossing listing-page
    /// boundaries, then issuing bulk deletes.
    pub async fn delete_directory(&self, prefix: &str) -> StorageResult<()> {
        let keys = self.list_keys(prefix).await?;
        debug!("Deleting {} objects under {}", keys.len(), prefix);

        for batch in keys.chunks(DELETE_BATCH_SIZE) {
            self.delete_batch(prefix, batch).await?;
        }

        Ok(())
    }

    /// List all keys under a prefix, following continuation tokens.
    async fn list_keys(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix);

            if let Some(page_size) = self.list_page_size {
                request = request.max_keys(page_size);
            }

            if let Some(token) = continuation_token {
                request = request.continuation_token(token);
            }

            let response = request
                .send()
                .await
                .map_err(|e| StorageError::list_failed(prefix, e.to_string()))?;

            let truncated = response.is_truncated() == Some(true);

            if let Some(contents) = response.contents {
                keys.extend(contents.into_iter().filter_map(|obj| obj.key));
            }

            if truncated {
                continuation_token = response.next_continuation_token;
            } else {
                break;
            }
        }

        Ok(keys)
    }

    async fn delete_batch(&self, prefix: &str, keys: &[String]) -> StorageResult<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let objects: Vec<ObjectIdentifier> = keys
            .iter()
            .map(|k| {
                ObjectIdentifier::builder()
                    .key(k)
                    .build()
                    .map_err(|e| StorageError::delete_failed(prefix, e.to_string()))
            })
            .collect::<StorageResult<_>>()?;

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .quiet(true)
            .build()
            .map_err(|e| StorageError::delete_failed(prefix, e.to_string()))?;

        self.client
            .delete_objects()
            .bucket(&self.bucket)
            .delete(delete)
            .send()
            .await
            .map_err(|e| StorageError::delete_failed(prefix, e.to_string()))?;

        Ok(())
    }
}
