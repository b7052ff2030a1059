//! # Object Storage Collaborator
//!
//! The bucket interface behind image upload, plus its HTTP implementation
//! against a Supabase-style storage endpoint.
//!
//! ## Request Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  put         POST   /storage/v1/object/<bucket>/<key>   body: bytes    │
//! │  remove      DELETE /storage/v1/object/<bucket>/<key>                  │
//! │  public_url         /storage/v1/object/public/<bucket>/<key>           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use crate::error::{ImageError, ImageResult};

/// Request timeout for every storage call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Bucket operations needed by the uploader.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `bytes` under `key`. Keys are unique by construction
    /// (timestamped), so this never overwrites.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> ImageResult<()>;

    /// Removes the object under `key`. Removing a missing key is the
    /// backend's business; callers treat any failure as best-effort.
    async fn remove(&self, key: &str) -> ImageResult<()>;

    /// The publicly servable URL for `key`.
    fn public_url(&self, key: &str) -> String;
}

// =============================================================================
// Configuration
// =============================================================================

/// Connection settings for the storage endpoint.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`.
    pub base_url: String,

    /// API key, sent as both `apikey` and bearer token.
    pub api_key: String,

    /// Bucket name.
    pub bucket: String,
}

impl StorageConfig {
    /// Creates a config for the default `product-images` bucket.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        StorageConfig {
            base_url: base_url.into(),
            api_key: api_key.into(),
            bucket: "product-images".to_string(),
        }
    }

    /// Overrides the bucket name.
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.bucket,
            key
        )
    }
}

// =============================================================================
// HTTP Object Store
// =============================================================================

/// Supabase-style HTTP implementation of [`ObjectStore`].
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    client: reqwest::Client,
    config: StorageConfig,
}

impl HttpObjectStore {
    /// Builds the client with auth headers and a fixed request timeout.
    pub fn new(config: StorageConfig) -> ImageResult<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| ImageError::InvalidConfig(format!("invalid api key: {}", e)))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| ImageError::InvalidConfig(format!("invalid api key: {}", e)))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(HttpObjectStore { client, config })
    }

    async fn check(resp: reqwest::Response) -> ImageResult<()> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let message = resp.text().await.unwrap_or_default();
        Err(ImageError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> ImageResult<()> {
        debug!(key = %key, size = bytes.len(), "uploading object");
        let resp = self
            .client
            .post(self.config.object_url(key))
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        Self::check(resp).await
    }

    async fn remove(&self, key: &str) -> ImageResult<()> {
        debug!(key = %key, "removing object");
        let resp = self
            .client
            .delete(self.config.object_url(key))
            .send()
            .await?;
        Self::check(resp).await
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.bucket,
            key
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_url_shape() {
        let config = StorageConfig::new("https://abc.supabase.co/", "key");
        assert_eq!(
            config.object_url("notebook/123-cover.jpg"),
            "https://abc.supabase.co/storage/v1/object/product-images/notebook/123-cover.jpg"
        );
    }

    #[test]
    fn test_public_url_shape() {
        let store =
            HttpObjectStore::new(StorageConfig::new("https://abc.supabase.co", "key")).unwrap();
        assert_eq!(
            store.public_url("illustrated-book/123-cover.jpg"),
            "https://abc.supabase.co/storage/v1/object/public/product-images/illustrated-book/123-cover.jpg"
        );
    }

    #[test]
    fn test_with_bucket_overrides_default() {
        let config = StorageConfig::new("https://abc.supabase.co", "key").with_bucket("staging");
        assert_eq!(
            config.object_url("k"),
            "https://abc.supabase.co/storage/v1/object/staging/k"
        );
    }
}
