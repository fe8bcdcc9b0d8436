use super::extract;
use super::types::GenerateContentRequest;
use crate::ai::TextGenerationService;
use crate::models::{Config, GenerationOutcome};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Transport-level cap; the story service applies its own shorter bound.
const TRANSPORT_TIMEOUT: Duration = Duration::from_secs(30);

/// Returned verbatim by a disabled client instead of performing network I/O.
pub const KEY_SETUP_MESSAGE: &str = "\
AI key is not configured. To enable AI features:
1) Create an API key in Google AI Studio: https://aistudio.google.com/app/apikey
2) Enable the Generative Language API in your GCP Console
3) Ensure billing is enabled on the project
4) Set the GEMINI_API_KEY environment variable (or add it to your .env file)
After setting the key, restart the application.
";

/// Gemini REST client, constructed once at startup.
///
/// Without an API key the client is permanently disabled and answers every
/// call with [`KEY_SETUP_MESSAGE`] instead of failing.
pub enum GeminiClient {
    Disabled,
    Enabled(GeminiGenerator),
}

/// The live half of [`GeminiClient`].
pub struct GeminiGenerator {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn from_config(config: &Config) -> Self {
        let Some(key) = &config.gemini_api_key else {
            tracing::warn!(
                "Gemini client disabled - no API key configured. AI calls will return setup instructions."
            );
            return GeminiClient::Disabled;
        };

        let model = config
            .gemini_model
            .strip_prefix("models/")
            .unwrap_or(&config.gemini_model)
            .to_string();

        tracing::info!(
            "Gemini client enabled for model={} endpoint={}/v1beta/models/{}:generateContent",
            model,
            DEFAULT_BASE_URL,
            model
        );

        GeminiClient::Enabled(GeminiGenerator {
            client: Client::new(),
            api_key: key.clone(),
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        if let GeminiClient::Enabled(generator) = &mut self {
            generator.base_url = base_url;
        }
        self
    }
}

impl GeminiGenerator {
    /// POST the prompt and return the raw 2xx response body.
    async fn fetch_story_body(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let request = GenerateContentRequest::from_prompt(prompt, max_tokens);

        let response = self
            .client
            .post(&url)
            .timeout(TRANSPORT_TIMEOUT)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "(unable to read response body)".to_string());
            return Err(Error::UpstreamStatus { status, body });
        }

        Ok(response.text().await?)
    }
}

/// Render an internal failure as the string shown to the user.
fn failure_text(err: &Error) -> String {
    match err {
        Error::UpstreamStatus { status, body } => format!("AI Error {status}: {body}"),
        Error::Http(e) if e.is_connect() => {
            "Error: No internet connection or DNS failure.".to_string()
        }
        Error::Http(e) => format!("Error: {e}"),
    }
}

#[async_trait]
impl TextGenerationService for GeminiClient {
    async fn generate_text(&self, prompt: &str, max_tokens: u32) -> GenerationOutcome {
        let generator = match self {
            GeminiClient::Disabled => {
                tracing::debug!("Gemini client disabled; returning setup instructions");
                return GenerationOutcome::Degraded(KEY_SETUP_MESSAGE.to_string());
            }
            GeminiClient::Enabled(generator) => generator,
        };

        match generator.fetch_story_body(prompt, max_tokens).await {
            Ok(body) => extract::extract_story_text(&body),
            Err(err) => {
                match &err {
                    Error::UpstreamStatus { status, body } => {
                        tracing::warn!("AI returned error: status={}, body={}", status, body);
                    }
                    Error::Http(e) if e.is_connect() => {
                        tracing::warn!("Network/DNS problem when calling Gemini: {}", e);
                    }
                    Error::Http(e) => {
                        tracing::error!("Unexpected error calling Gemini: {}", e);
                    }
                }
                GenerationOutcome::Failed(failure_text(&err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DEFAULT_MODEL_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

    fn test_config(key: Option<&str>, model: &str) -> Config {
        Config {
            gemini_api_key: key.map(str::to_string),
            gemini_model: model.to_string(),
        }
    }

    fn make_client(server: &MockServer, key: &str, model: &str) -> GeminiClient {
        GeminiClient::from_config(&test_config(Some(key), model)).with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_generate_text_sends_wire_payload_and_extracts_story() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(DEFAULT_MODEL_PATH))
            .and(query_param("key", "test-key"))
            .and(body_json(serde_json::json!({
                "contents": [{ "parts": [{ "text": "a prompt" }] }],
                "generationConfig": { "maxOutputTokens": 400 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [{ "text": "Once upon a time" }]
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, "test-key", "gemini-2.0-flash");
        let outcome = client.generate_text("a prompt", 400).await;

        assert_eq!(
            outcome,
            GenerationOutcome::Completed("Once upon a time".to_string())
        );
    }

    #[tokio::test]
    async fn test_http_error_maps_to_status_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(DEFAULT_MODEL_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let client = make_client(&server, "bad-key", "gemini-2.0-flash");
        let outcome = client.generate_text("a prompt", 400).await;

        assert_eq!(
            outcome,
            GenerationOutcome::Failed("AI Error 403 Forbidden: forbidden".to_string())
        );
    }

    #[tokio::test]
    async fn test_connect_failure_maps_to_fixed_message() {
        let client = GeminiClient::from_config(&test_config(Some("test-key"), "gemini-2.0-flash"))
            .with_base_url("http://storyweaver-test.invalid".to_string());

        let outcome = client.generate_text("a prompt", 400).await;

        assert_eq!(
            outcome,
            GenerationOutcome::Failed("Error: No internet connection or DNS failure.".to_string())
        );
    }

    #[tokio::test]
    async fn test_disabled_client_returns_setup_message_without_network() {
        let client = GeminiClient::from_config(&test_config(None, "gemini-2.0-flash"));
        assert!(matches!(client, GeminiClient::Disabled));

        let outcome = client.generate_text("a prompt", 400).await;
        assert_eq!(
            outcome,
            GenerationOutcome::Degraded(KEY_SETUP_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_unparseable_body_is_reported_as_parse_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(DEFAULT_MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = make_client(&server, "test-key", "gemini-2.0-flash");
        let outcome = client.generate_text("a prompt", 400).await;

        match outcome {
            GenerationOutcome::Failed(text) => assert!(text.starts_with("Error parsing story: ")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_shape_echoes_raw_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(DEFAULT_MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"unexpected":true}"#))
            .mount(&server)
            .await;

        let client = make_client(&server, "test-key", "gemini-2.0-flash");
        let outcome = client.generate_text("a prompt", 400).await;

        assert_eq!(
            outcome,
            GenerationOutcome::Degraded(
                r#"AI returned no text. Raw response: {"unexpected":true}"#.to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_models_prefix_is_stripped_from_model_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(DEFAULT_MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [{ "text": "a story" }]
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, "test-key", "models/gemini-2.0-flash");
        let outcome = client.generate_text("a prompt", 400).await;

        assert_eq!(outcome, GenerationOutcome::Completed("a story".to_string()));
    }
}
