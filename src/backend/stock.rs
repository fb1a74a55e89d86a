//! Deterministic stock photo selection

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::backend::traits::{content_type_of, ensure_success, GenerateRequest, GeneratedImage, ImageBackend};
use crate::error::{AppError, Result};

const SERVICE: &str = "Stock photo";

/// Rolling string hash (`acc * 31 + unit` over UTF-16 code units, wrapping at
/// signed 32 bits), returned as an absolute value.
pub fn prompt_hash(prompt: &str) -> u32 {
    let acc = prompt
        .encode_utf16()
        .fold(0i32, |acc, unit| acc.wrapping_mul(31).wrapping_add(i32::from(unit)));
    acc.unsigned_abs()
}

/// Index into a pool of `pool_size` entries for `prompt`
pub fn select_index(prompt: &str, pool_size: usize) -> Option<usize> {
    if pool_size == 0 {
        return None;
    }
    Some(prompt_hash(prompt) as usize % pool_size)
}

/// Serves a fixed pool of stock photo URLs, one per prompt
pub struct StockPhotoBackend {
    client: Client,
    photos: Vec<String>,
}

impl StockPhotoBackend {
    pub fn new(client: Client, photos: Vec<String>) -> Self {
        Self { client, photos }
    }

    /// URL chosen for a prompt
    pub fn select(&self, prompt: &str) -> Option<&str> {
        select_index(prompt, self.photos.len()).map(|i| self.photos[i].as_str())
    }
}

#[async_trait]
impl ImageBackend for StockPhotoBackend {
    fn name(&self) -> &str {
        "stock"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GeneratedImage> {
        // Selection keys on the unenhanced prompt.
        let url = self
            .select(&request.prompt)
            .ok_or_else(|| AppError::MissingData("Stock photo pool is empty".to_string()))?;

        debug!(url = %url, "Fetching stock photo");

        let response = self.client.get(url).send().await?;
        let response = ensure_success(SERVICE, response).await?;
        let content_type = content_type_of(&response).unwrap_or_else(|| "image/jpeg".to_string());
        let data = response.bytes().await?;

        if data.is_empty() {
            return Err(AppError::MissingData(format!("Stock photo {} returned no data", url)));
        }

        Ok(GeneratedImage {
            data,
            content_type,
            model: "stock".to_string(),
        })
    }
}
