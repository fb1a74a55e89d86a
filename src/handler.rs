//! Image request handler: prompt enhancement, image acquisition and upload

use chrono::Utc;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::backend::{
    DiffusionBackend, GeminiClient, GenerateRequest, ImageBackend, PromptEnhancer, StockPhotoBackend,
};
use crate::config::{ImageStrategy, Settings};
use crate::error::{AppError, Result};
use crate::prompt;
use crate::response::{ImageOutcome, StoredImage};
use crate::storage::{self, ObjectStore};

/// Runs one request through enhance → acquire → (upload)
pub struct ImageRequestHandler {
    strategy: ImageStrategy,
    enhancer: Option<Arc<dyn PromptEnhancer>>,
    backend: Arc<dyn ImageBackend>,
    store: Option<ObjectStore>,
}

impl ImageRequestHandler {
    /// Assemble a handler from explicit parts
    pub fn new(
        strategy: ImageStrategy,
        enhancer: Option<Arc<dyn PromptEnhancer>>,
        backend: Arc<dyn ImageBackend>,
        store: Option<ObjectStore>,
    ) -> Self {
        Self {
            strategy,
            enhancer,
            backend,
            store,
        }
    }

    /// Build the handler for the configured strategy
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(settings.upstream.timeout_ms))
            .build()
            .map_err(AppError::HttpClient)?;

        let gemini = Arc::new(GeminiClient::new(client.clone(), settings.gemini.clone()));
        let enhancer = settings
            .handler
            .enhance_prompt
            .then(|| gemini.clone() as Arc<dyn PromptEnhancer>);

        let strategy = settings.handler.strategy;
        let backend: Arc<dyn ImageBackend> = match strategy {
            ImageStrategy::Direct => gemini as Arc<dyn ImageBackend>,
            ImageStrategy::Stock => Arc::new(StockPhotoBackend::new(
                client.clone(),
                settings.stock.photos.clone(),
            )),
            ImageStrategy::Diffusion => Arc::new(DiffusionBackend::new(
                client.clone(),
                settings.diffusion.clone(),
            )),
        };

        let store = match strategy {
            ImageStrategy::Diffusion => Some(ObjectStore::new(client, &settings.storage)),
            ImageStrategy::Direct | ImageStrategy::Stock => None,
        };

        Ok(Self::new(strategy, enhancer, backend, store))
    }

    pub fn strategy(&self) -> ImageStrategy {
        self.strategy
    }

    /// Handle a request carrying an optional raw `prompt` value
    pub async fn handle(&self, raw_prompt: Option<&str>) -> Result<ImageOutcome> {
        let prompt = prompt::resolve(raw_prompt);
        debug!(strategy = %self.strategy, prompt = %prompt, "Handling image request");

        let enhanced_prompt = match &self.enhancer {
            Some(enhancer) => {
                let enhanced = enhancer.enhance(&prompt).await?;
                debug!(enhanced = %enhanced, "Prompt enhanced");
                Some(enhanced)
            }
            None => None,
        };

        let request = GenerateRequest::new(prompt.clone(), enhanced_prompt.clone());
        let image = self.backend.generate(request).await?;
        info!(
            backend = %self.backend.name(),
            bytes = image.data.len(),
            "Image acquired"
        );

        let Some(store) = &self.store else {
            return Ok(ImageOutcome::Image(image.data));
        };

        let key = storage::object_key(&prompt, Utc::now().timestamp_millis());
        let image_url = store.upload(&key, image.data, &image.content_type).await?;

        Ok(ImageOutcome::Stored(StoredImage {
            image_url,
            success: true,
            enhanced_prompt: enhanced_prompt.unwrap_or_else(|| prompt.clone()),
            prompt,
            model: image.model,
        }))
    }
}
