//! AI service integration for story text generation
//!
//! Provides the generation trait implemented by the Gemini REST client and a
//! mock used in tests.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiClient;
pub use mock::MockTextClient;

use crate::models::GenerationOutcome;
use async_trait::async_trait;

#[async_trait]
pub trait TextGenerationService: Send + Sync {
    /// Request up to `max_tokens` of generated text for `prompt`.
    ///
    /// Implementations never fail: every outcome carries displayable text.
    async fn generate_text(&self, prompt: &str, max_tokens: u32) -> GenerationOutcome;
}
