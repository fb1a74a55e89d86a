//! Supabase-style object storage client

use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, info};

use crate::config::StorageConfig;
use crate::error::{AppError, Result};

/// Uploads images to a bucket and builds their public URLs
pub struct ObjectStore {
    client: Client,
    base_url: String,
    bucket: String,
    service_key: String,
}

impl ObjectStore {
    pub fn new(client: Client, config: &StorageConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bucket: config.bucket.clone(),
            service_key: config.service_key.clone(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, key)
    }

    /// Public URL for an uploaded object
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base_url, self.bucket, key)
    }

    /// Upload `data` under `key` and return its public URL
    pub async fn upload(&self, key: &str, data: Bytes, content_type: &str) -> Result<String> {
        let size = data.len();
        debug!(bucket = %self.bucket, key = %key, bytes = size, "Uploading image");

        let response = self
            .client
            .post(self.object_url(key))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .body(data)
            .send()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upload(format!("storage returned {}: {}", status, body)));
        }

        let url = self.public_url(key);
        info!(url = %url, bytes = size, "Image uploaded");
        Ok(url)
    }
}
