//! HTTP handlers

use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::error::Result;
use crate::response::ImageOutcome;
use crate::AppState;

/// First value of `key` among decoded query pairs; repeated keys are allowed
pub fn first_param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

/// `GET|POST /?prompt=...`
pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<ImageOutcome> {
    state.handler.handle(first_param(&pairs, "prompt")).await
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    "ok"
}
