//! Configuration module - Layered settings for the gateway

pub mod settings;

pub use settings::{
    DiffusionConfig, GeminiConfig, HandlerConfig, ImageStrategy, LoggingConfig, ServerConfig,
    Settings, StockConfig, StorageConfig, UpstreamConfig,
};
