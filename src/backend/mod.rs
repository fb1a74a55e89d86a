//! Backend module - Upstream text and image clients

pub mod diffusion;
pub mod gemini;
pub mod stock;
pub mod traits;

pub use diffusion::DiffusionBackend;
pub use gemini::GeminiClient;
pub use stock::StockPhotoBackend;
pub use traits::{GenerateRequest, GeneratedImage, ImageBackend, PromptEnhancer};
