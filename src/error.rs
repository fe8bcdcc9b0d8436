//! Error handling and custom error types
//!
//! Internal plumbing errors for the AI client. These never escape the client
//! boundary; they are rendered to display strings before reaching callers.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI API error (status {status}): {body}")]
    UpstreamStatus { status: StatusCode, body: String },
}

pub type Result<T> = std::result::Result<T, Error>;
