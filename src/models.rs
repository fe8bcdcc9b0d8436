//! Data models and configuration
//!
//! Core data structures for story requests, generation outcomes, and the
//! process-wide configuration loaded once at startup.

/// Model requested when `GEMINI_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// A single story generation request as received from the caller.
#[derive(Debug, Clone)]
pub struct StoryRequest {
    pub words: String,
    pub genre: Option<String>,
}

impl StoryRequest {
    pub fn new(words: impl Into<String>, genre: Option<String>) -> Self {
        Self {
            words: words.into(),
            genre,
        }
    }
}

/// Tagged result of a generation attempt.
///
/// Every variant carries displayable text; [`GenerationOutcome::into_text`]
/// flattens to the plain string shown to the caller. The tags exist so tests
/// and logging can distinguish real model output from fallback text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Text extracted from a model response.
    Completed(String),
    /// Readable fallback text (missing API key, unrecognized response shape).
    Degraded(String),
    /// Transport, API, or parse failure rendered as text.
    Failed(String),
}

impl GenerationOutcome {
    pub fn text(&self) -> &str {
        match self {
            Self::Completed(text) | Self::Degraded(text) | Self::Failed(text) => text,
        }
    }

    /// Flatten to the display string handed back to the caller.
    pub fn into_text(self) -> String {
        match self {
            Self::Completed(text) | Self::Degraded(text) | Self::Failed(text) => text,
        }
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// May be absent; the AI client is then constructed disabled.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
}

impl Config {
    /// Load configuration from the environment (and `.env` when present).
    ///
    /// A missing or blank `GEMINI_API_KEY` disables the AI client instead of
    /// failing startup.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let gemini_model = std::env::var("GEMINI_MODEL")
            .ok()
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            gemini_api_key,
            gemini_model,
        }
    }
}
