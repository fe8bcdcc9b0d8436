pub mod client;
pub mod extract;
pub mod types;

pub use client::{GeminiClient, KEY_SETUP_MESSAGE};
