//! Story generator backed by the Google Generative Language API.
//!
//! Turns user-supplied words and an optional genre into a natural-language
//! prompt, sends it to a Gemini text model, and normalizes whatever comes
//! back into displayable text. Every failure path yields readable text
//! instead of an error, so callers always have something to show.

pub mod ai;
pub mod error;
pub mod models;
pub mod prompt;
pub mod story;

pub use error::{Error, Result};
