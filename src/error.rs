//! Common error types for the food image gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Fixed `error` value of every failure response
pub const GENERATION_FAILED: &str = "Failed to generate image";

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Upstream body was not the JSON shape we expect
    #[error("Invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Non-2xx status from an upstream service
    #[error("{service} API error: {status}")]
    UpstreamHttp {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// An expected field was absent from an upstream response
    #[error("{0}")]
    MissingData(String),

    #[error("Invalid image data: {0}")]
    InvalidImageData(String),

    #[error("Upload failed: {0}")]
    Upload(String),
}

/// Error body returned to callers
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::UpstreamHttp { service, status, body } => {
                error!(service = %service, status = %status, body = %body, "Error generating image");
            }
            other => error!(error = %other, "Error generating image"),
        }

        // Callers only ever see the message text; every failure is a 500.
        let body = Json(ErrorResponse {
            error: GENERATION_FAILED.to_string(),
            message: self.to_string(),
        });

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
