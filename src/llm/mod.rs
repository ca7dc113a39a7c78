//! Generative model client module
//!
//! The external generation capability as the rest of the crate sees it:
//! a `GenerativeClient` trait, a Gemini implementation, and a scripted
//! mock for tests.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod gemini;
mod types;

pub use client::GenerativeClient;
pub use error::GenerationError;
pub use gemini::GeminiClient;
pub use types::{GenMessage, GenerationRequest, GenerationResponse, InlineData, Part, Role};

use crate::config::LlmConfig;

/// Create a generative client for the given model based on config
///
/// Currently only the "gemini" provider is supported.
pub fn create_client(config: &LlmConfig, model: &str) -> Result<Arc<dyn GenerativeClient>, GenerationError> {
    debug!(provider = %config.provider, %model, "create_client: called");
    match config.provider.as_str() {
        "gemini" => Ok(Arc::new(GeminiClient::from_config(config, model)?)),
        other => Err(GenerationError::InvalidResponse(format!(
            "Unknown generation provider: '{}'. Supported: gemini",
            other
        ))),
    }
}
