use super::TextGenerationService;
use crate::models::GenerationOutcome;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted [`TextGenerationService`] for tests.
///
/// Queued outcomes are returned in order and cycle when exhausted. Clones
/// share state so a probe handle can observe calls made through the service.
#[derive(Clone)]
pub struct MockTextClient {
    responses: Arc<Mutex<Vec<GenerationOutcome>>>,
    last_prompt: Arc<Mutex<Option<String>>>,
    call_count: Arc<Mutex<usize>>,
    delay: Option<Duration>,
}

impl MockTextClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            last_prompt: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(0)),
            delay: None,
        }
    }

    pub fn with_outcome(self, outcome: GenerationOutcome) -> Self {
        self.responses.lock().unwrap().push(outcome);
        self
    }

    /// Sleep before answering; used to exercise deadline handling.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

impl Default for MockTextClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerationService for MockTextClient {
    async fn generate_text(&self, prompt: &str, _max_tokens: u32) -> GenerationOutcome {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());

        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default mock response embeds the prompt so passthrough is assertable
            GenerationOutcome::Completed(format!("A short tale spun from: {prompt}"))
        } else {
            let index = (*count - 1) % responses.len();
            responses[index].clone()
        }
    }
}
