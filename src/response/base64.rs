//! Base64 decoding of inline image payloads

use base64::{engine::general_purpose::STANDARD, Engine};
use crate::error::{AppError, Result};

/// Decode base64 image data, accepting a `data:` URL prefix
pub fn decode(encoded: &str) -> Result<Vec<u8>> {
    let data = match encoded.split_once(',') {
        Some((prefix, payload)) if prefix.starts_with("data:") => payload,
        _ => encoded,
    };

    // Some upstreams wrap long payloads across lines.
    let cleaned: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    STANDARD
        .decode(cleaned)
        .map_err(|e| AppError::InvalidImageData(format!("Invalid base64 data: {}", e)))
}
