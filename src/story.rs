//! Story generation orchestration.

use crate::ai::{GeminiClient, TextGenerationService};
use crate::models::{Config, StoryRequest};
use crate::prompt;
use std::time::Duration;
use tracing::{debug, error};

/// Response-length budget requested from the model.
pub const MAX_OUTPUT_TOKENS: u32 = 400;

/// Upper bound on how long one generation may occupy the caller.
pub const GENERATION_WAIT: Duration = Duration::from_secs(10);

/// Single entry point for callers: words + genre in, displayable text out.
pub struct StoryService {
    model: Box<dyn TextGenerationService>,
}

impl StoryService {
    pub fn new(model: Box<dyn TextGenerationService>) -> Self {
        Self { model }
    }

    /// Wire the service to a Gemini client built from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Box::new(GeminiClient::from_config(config)))
    }

    /// Generate a story, waiting at most [`GENERATION_WAIT`].
    ///
    /// Never fails: deadline expiry and every upstream problem surface as
    /// readable text.
    pub async fn generate(&self, request: &StoryRequest) -> String {
        let prompt = prompt::build_prompt(&request.words, request.genre.as_deref());
        debug!("Generating story for prompt ({} chars)", prompt.len());

        let generation = self.model.generate_text(&prompt, MAX_OUTPUT_TOKENS);
        match tokio::time::timeout(GENERATION_WAIT, generation).await {
            Ok(outcome) => {
                let text = outcome.into_text();
                if text.is_empty() {
                    "AI returned no content.".to_string()
                } else {
                    text
                }
            }
            Err(elapsed) => {
                error!("Story generation failed: {}", elapsed);
                format!("Story generation failed: {elapsed}")
            }
        }
    }
}
