//! Food Image Gateway
//!
//! Turns a food prompt into a photograph: optionally rewrites the prompt with a
//! hosted language model, then generates, selects or diffuses an image and
//! returns the bytes or a link to the stored copy.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod handler;
pub mod prompt;
pub mod response;
pub mod storage;

pub use error::{AppError, Result};

use handler::ImageRequestHandler;

/// Application state shared across all handlers
pub struct AppState {
    pub settings: config::Settings,
    pub handler: ImageRequestHandler,
}

impl AppState {
    /// Build state for the configured strategy
    pub fn from_settings(settings: config::Settings) -> Result<Self> {
        let handler = ImageRequestHandler::from_settings(&settings)?;
        Ok(Self { settings, handler })
    }
}
