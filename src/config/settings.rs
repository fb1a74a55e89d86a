//! Application settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub handler: HandlerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub stock: StockConfig,
    #[serde(default)]
    pub diffusion: DiffusionConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// How the handler obtains image bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStrategy {
    /// Gemini image generation, bytes returned inline
    #[default]
    Direct,
    /// Hash-selected stock photo
    Stock,
    /// Hosted diffusion followed by an object-storage upload
    Diffusion,
}

impl fmt::Display for ImageStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageStrategy::Direct => "direct",
            ImageStrategy::Stock => "stock",
            ImageStrategy::Diffusion => "diffusion",
        };
        f.write_str(name)
    }
}

/// Request handler configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HandlerConfig {
    #[serde(default)]
    pub strategy: ImageStrategy,
    /// Rewrite the prompt with the text model before acquiring an image
    #[serde(default)]
    pub enhance_prompt: bool,
}

/// Shared outbound HTTP client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

fn default_timeout() -> u64 {
    60000
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout(),
        }
    }
}

/// Gemini text and image generation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_text_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_image_model() -> String {
    "imagen-3.0-generate-002".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_gemini_base_url(),
            text_model: default_text_model(),
            image_model: default_image_model(),
        }
    }
}

/// Stock photo pool
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StockConfig {
    #[serde(default = "default_stock_photos")]
    pub photos: Vec<String>,
}

fn default_stock_photos() -> Vec<String> {
    [
        "photo-1504674900247-0877df9cc836",
        "photo-1546069901-ba9599a7e63c",
        "photo-1565299624946-b28f40a0ae38",
        "photo-1540189549336-e6e99c3679fe",
        "photo-1567620905732-2d1ec7ab7445",
        "photo-1565958011703-44f9829ba187",
        "photo-1482049016688-2d3e1b311543",
        "photo-1512621776951-a57141f2eefd",
    ]
    .iter()
    .map(|id| format!("https://images.unsplash.com/{}?w=1024&q=80", id))
    .collect()
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            photos: default_stock_photos(),
        }
    }
}

/// Hosted diffusion inference
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiffusionConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_diffusion_base_url")]
    pub base_url: String,
    #[serde(default = "default_diffusion_model")]
    pub model: String,
    #[serde(default = "default_steps")]
    pub num_inference_steps: u32,
    #[serde(default = "default_guidance_scale")]
    pub guidance_scale: f32,
    #[serde(default = "default_dimension")]
    pub width: u32,
    #[serde(default = "default_dimension")]
    pub height: u32,
}

fn default_diffusion_base_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_diffusion_model() -> String {
    "stabilityai/stable-diffusion-xl-base-1.0".to_string()
}

fn default_steps() -> u32 {
    30
}

fn default_guidance_scale() -> f32 {
    7.5
}

fn default_dimension() -> u32 {
    1024
}

impl Default for DiffusionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_diffusion_base_url(),
            model: default_diffusion_model(),
            num_inference_steps: default_steps(),
            guidance_scale: default_guidance_scale(),
            width: default_dimension(),
            height: default_dimension(),
        }
    }
}

/// Object storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_bucket")]
    pub bucket: String,
    #[serde(default)]
    pub service_key: String,
}

fn default_bucket() -> String {
    "food-images".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            bucket: default_bucket(),
            service_key: String::new(),
        }
    }
}

fn invalid(message: impl Into<String>) -> AppError {
    AppError::Config(config::ConfigError::Message(message.into()))
}

impl Settings {
    /// Load settings from configuration files and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/default.toml")
    }

    /// Load settings from a specific configuration file path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("handler.strategy", "direct")?
            .set_default("handler.enhance_prompt", false)?
            .add_source(File::with_name(path.as_ref().to_str().unwrap_or("config/default")).required(false))
            // Override with environment variables (prefixed with FOOD_IMAGE_)
            .add_source(
                Environment::with_prefix("FOOD_IMAGE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }

    /// Validate the configuration for the selected strategy
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(invalid("Server port cannot be 0"));
        }

        let strategy = self.handler.strategy;
        let needs_gemini = self.handler.enhance_prompt || strategy == ImageStrategy::Direct;
        if needs_gemini && self.gemini.api_key.is_empty() {
            return Err(invalid(format!(
                "gemini.api_key is required for the '{}' strategy{}",
                strategy,
                if self.handler.enhance_prompt { " with prompt enhancement" } else { "" }
            )));
        }

        match strategy {
            ImageStrategy::Direct => {}
            ImageStrategy::Stock => {
                if self.stock.photos.is_empty() {
                    return Err(invalid("stock.photos must contain at least one URL"));
                }
            }
            ImageStrategy::Diffusion => {
                if self.diffusion.api_key.is_empty() {
                    return Err(invalid("diffusion.api_key is required for the 'diffusion' strategy"));
                }
                if self.storage.base_url.is_empty() || self.storage.service_key.is_empty() {
                    return Err(invalid(
                        "storage.base_url and storage.service_key are required for the 'diffusion' strategy",
                    ));
                }
                if self.storage.bucket.is_empty() {
                    return Err(invalid("storage.bucket cannot be empty"));
                }
            }
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            handler: HandlerConfig::default(),
            upstream: UpstreamConfig::default(),
            gemini: GeminiConfig::default(),
            stock: StockConfig::default(),
            diffusion: DiffusionConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}
