//! Gemini client for prompt enhancement and direct image generation

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::traits::{ensure_success, GenerateRequest, GeneratedImage, ImageBackend, PromptEnhancer};
use crate::config::GeminiConfig;
use crate::error::{AppError, Result};
use crate::prompt;
use crate::response::base64;

const SERVICE: &str = "Gemini";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: Option<String>,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    candidate_count: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or(&[])
    }

    /// Concatenated text of the first candidate
    fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    /// First inline image of the first candidate
    fn inline_data(&self) -> Option<&InlineData> {
        self.first_parts().iter().find_map(|p| p.inline_data.as_ref())
    }
}

impl GenerateContentRequest {
    fn user_text(text: String, generation_config: Option<GenerationConfig>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(text),
                    inline_data: None,
                }],
                role: Some("user".to_string()),
            }],
            generation_config,
        }
    }
}

/// Gemini REST client
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(client: Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let response = self
            .client
            .post(self.endpoint(model))
            .query(&[("key", self.config.api_key.as_str())])
            .json(request)
            .send()
            .await?;

        let response = ensure_success(SERVICE, response).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl PromptEnhancer for GeminiClient {
    async fn enhance(&self, prompt: &str) -> Result<String> {
        let model = &self.config.text_model;
        debug!(model = %model, "Enhancing prompt");

        let request = GenerateContentRequest::user_text(prompt::enhancement_instruction(prompt), None);
        let response = self.generate_content(model, &request).await?;

        response
            .text()
            .ok_or_else(|| AppError::MissingData("No text received from Gemini API".to_string()))
    }
}

#[async_trait]
impl ImageBackend for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GeneratedImage> {
        let model = &self.config.image_model;
        let text = match request.enhanced_prompt {
            Some(enhanced) => enhanced,
            None => prompt::image_prompt(&request.prompt),
        };

        debug!(model = %model, "Sending generate request");

        let api_request = GenerateContentRequest::user_text(
            text,
            Some(GenerationConfig {
                response_mime_type: "image/jpeg".to_string(),
                candidate_count: 1,
            }),
        );
        let response = self.generate_content(model, &api_request).await?;

        let inline = response
            .inline_data()
            .ok_or_else(|| AppError::MissingData("No image data received from Gemini API".to_string()))?;
        let data = base64::decode(&inline.data)?;

        Ok(GeneratedImage {
            data: Bytes::from(data),
            content_type: inline
                .mime_type
                .clone()
                .unwrap_or_else(|| "image/jpeg".to_string()),
            model: model.clone(),
        })
    }
}
