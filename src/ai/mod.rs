//! AI service integration for image and text generation
//!
//! One trait per capability so each can be backed by its own model and
//! swapped for a mock in tests.

pub mod gemini;
pub mod mock;

pub use gemini::{GeminiAnalysisClient, GeminiImageClient, GeminiSearchClient};
pub use mock::{MockGenerativeClient, RecordedCall};

use crate::media::EncodedImage;
use crate::models::{AspectRatio, AssetSearchResult};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Generate an image from text alone.
    async fn generate_image(&self, prompt: &str, aspect_ratio: AspectRatio)
        -> Result<EncodedImage>;

    /// Apply `prompt` to a data-URI encoded source image.
    async fn edit_image(&self, source_image: &str, prompt: &str) -> Result<EncodedImage>;
}

#[async_trait]
pub trait ModelAnalysisService: Send + Sync {
    /// Free-form optimization feedback for a mesh screenshot. A response
    /// without text yields an empty string.
    async fn analyze_model(&self, source_image: &str, context: &str) -> Result<String>;
}

#[async_trait]
pub trait AssetSearchService: Send + Sync {
    async fn find_free_assets(&self, query: &str) -> Result<AssetSearchResult>;
}
