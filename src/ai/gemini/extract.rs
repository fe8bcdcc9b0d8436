//! Response-shape normalization for Gemini text responses.
//!
//! The upstream API family has shipped several response layouts over time, so
//! extraction tries an ordered list of known shapes against the raw body and
//! the first match wins.

use crate::models::GenerationOutcome;
use serde_json::Value;

/// Known response shapes, tried in order.
const SHAPE_RULES: &[fn(&Value) -> Option<String>] =
    &[candidates_text, output_field, outputs_field];

/// Turn a raw response body into displayable text.
///
/// Bodies that parse but match no known shape are echoed back verbatim so the
/// user still sees what the API returned.
pub fn extract_story_text(body: &str) -> GenerationOutcome {
    let root: Value = match serde_json::from_str(body) {
        Ok(root) => root,
        Err(e) => return GenerationOutcome::Failed(format!("Error parsing story: {e}")),
    };

    for rule in SHAPE_RULES {
        if let Some(text) = rule(&root) {
            return GenerationOutcome::Completed(text);
        }
    }

    tracing::debug!("Unexpected Gemini response shape: {}", body);
    GenerationOutcome::Degraded(format!("AI returned no text. Raw response: {body}"))
}

/// `candidates[0].content.parts[0]`: the `text` field when present, otherwise
/// the whole part serialized. Missing or empty `parts` falls through to the
/// next rule.
fn candidates_text(root: &Value) -> Option<String> {
    let part = root
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?
        .first()?;

    Some(match part.get("text").and_then(Value::as_str) {
        Some(text) => text.to_string(),
        None => part.to_string(),
    })
}

fn output_field(root: &Value) -> Option<String> {
    root.get("output").map(Value::to_string)
}

fn outputs_field(root: &Value) -> Option<String> {
    root.get("outputs").map(Value::to_string)
}
