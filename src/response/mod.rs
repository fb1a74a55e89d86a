//! Response handling module - Image bytes and stored-image payloads

pub mod base64;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Cache directive attached to image bodies
pub const IMAGE_CACHE_CONTROL: &str = "public, max-age=3600";

/// Reference to an uploaded image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredImage {
    pub image_url: String,
    pub success: bool,
    pub prompt: String,
    pub enhanced_prompt: String,
    pub model: String,
}

/// What the handler produced for a request
#[derive(Debug, Clone)]
pub enum ImageOutcome {
    /// Raw image bytes
    Image(Bytes),
    /// Image persisted to object storage
    Stored(StoredImage),
}

impl IntoResponse for ImageOutcome {
    fn into_response(self) -> Response {
        match self {
            ImageOutcome::Image(data) => (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "image/jpeg"),
                    (header::CACHE_CONTROL, IMAGE_CACHE_CONTROL),
                ],
                data,
            )
                .into_response(),
            ImageOutcome::Stored(stored) => (StatusCode::OK, Json(stored)).into_response(),
        }
    }
}
