//! Hosted diffusion inference backend

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::backend::traits::{content_type_of, ensure_success, GenerateRequest, GeneratedImage, ImageBackend};
use crate::config::DiffusionConfig;
use crate::error::{AppError, Result};

const SERVICE: &str = "Diffusion";

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    num_inference_steps: u32,
    guidance_scale: f32,
    width: u32,
    height: u32,
    seed: u32,
}

/// Text-to-image through a hosted inference endpoint that answers with raw bytes
pub struct DiffusionBackend {
    client: Client,
    config: DiffusionConfig,
}

impl DiffusionBackend {
    pub fn new(client: Client, config: DiffusionConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn parameters(&self, seed: u32) -> InferenceParameters {
        InferenceParameters {
            num_inference_steps: self.config.num_inference_steps,
            guidance_scale: self.config.guidance_scale,
            width: self.config.width,
            height: self.config.height,
            seed,
        }
    }
}

#[async_trait]
impl ImageBackend for DiffusionBackend {
    fn name(&self) -> &str {
        "diffusion"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GeneratedImage> {
        let seed = rand::thread_rng().gen::<u32>();
        let body = InferenceRequest {
            inputs: request.working_prompt(),
            parameters: self.parameters(seed),
        };

        debug!(model = %self.config.model, seed, "Sending diffusion request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let response = ensure_success(SERVICE, response).await?;
        let content_type = content_type_of(&response).unwrap_or_else(|| "image/jpeg".to_string());
        let data = response.bytes().await?;

        if data.is_empty() {
            return Err(AppError::MissingData("No image data received from diffusion model".to_string()));
        }

        debug!(bytes = data.len(), "Diffusion image received");

        Ok(GeneratedImage {
            data,
            content_type,
            model: self.config.model.clone(),
        })
    }
}
