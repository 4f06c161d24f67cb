//! Completion request error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while calling the completion worker
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Worker returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Malformed worker response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Worker response contained no reply text")]
    EmptyReply,
}

impl RequestError {
    /// Whether the worker answered at all (as opposed to a transport failure)
    pub fn is_response_error(&self) -> bool {
        matches!(
            self,
            RequestError::Status { .. } | RequestError::Parse(_) | RequestError::EmptyReply
        )
    }
}
