//! Generation error types

use std::time::Duration;
use thiserror::Error;

/// Errors from the generative model boundary
///
/// Callers never branch on these individually: the rendering workflow and
/// the advisory orchestrator collapse them into the closed failure
/// vocabulary their replies are built from. The variants exist so the
/// transport layer can report precisely and the log line says what
/// actually happened.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Model returned no usable content")]
    EmptyResponse,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
