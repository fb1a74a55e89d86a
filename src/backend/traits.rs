//! Common traits and types for prompt enhancers and image backends

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{AppError, Result};

/// Request to acquire an image
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// The prompt as resolved from the incoming request
    pub prompt: String,

    /// Rewritten prompt, when enhancement ran
    pub enhanced_prompt: Option<String>,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>, enhanced_prompt: Option<String>) -> Self {
        Self {
            prompt: prompt.into(),
            enhanced_prompt,
        }
    }

    /// The prompt a generative model should see
    pub fn working_prompt(&self) -> &str {
        self.enhanced_prompt.as_deref().unwrap_or(&self.prompt)
    }
}

/// Image bytes obtained from a backend
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub data: Bytes,

    /// MIME type reported by the upstream
    pub content_type: String,

    /// Model (or source) identifier
    pub model: String,
}

/// Rewrites prompts with a text-generation model
#[async_trait]
pub trait PromptEnhancer: Send + Sync {
    async fn enhance(&self, prompt: &str) -> Result<String>;
}

/// Trait for image acquisition backends
#[async_trait]
pub trait ImageBackend: Send + Sync {
    /// Get the backend name
    fn name(&self) -> &str;

    /// Acquire image bytes for a request
    async fn generate(&self, request: GenerateRequest) -> Result<GeneratedImage>;
}

/// Turn a non-2xx upstream response into [`AppError::UpstreamHttp`]
pub(crate) async fn ensure_success(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AppError::UpstreamHttp {
        service,
        status: status.as_u16(),
        body,
    })
}

/// Content type header of a response, if present and readable
pub(crate) fn content_type_of(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}
