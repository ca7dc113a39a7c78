//! Gemini generateContent API client
//!
//! Implements the GenerativeClient trait against the Google Generative
//! Language REST API with bounded retries for transient errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{GenerationError, GenerationRequest, GenerationResponse, GenerativeClient, Part};
use crate::config::LlmConfig;

/// Maximum number of retries for transient errors
const MAX_RETRIES: u32 = 3;

/// Initial backoff delay for retries
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}

/// Gemini API client bound to one model
pub struct GeminiClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a new client from configuration, bound to the given model
    ///
    /// Reads the API key from the environment variables named in config.
    pub fn from_config(config: &LlmConfig, model: impl Into<String>) -> Result<Self, GenerationError> {
        let model = model.into();
        debug!(%model, "GeminiClient::from_config: called");
        let api_key = config
            .get_api_key()
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GenerationError::Network)?;

        Ok(Self {
            model,
            api_key,
            base_url: config.base_url.clone(),
            http,
            timeout,
        })
    }

    /// Build the request body for the generateContent endpoint
    fn build_request_body(&self, request: &GenerationRequest) -> serde_json::Value {
        debug!(%self.model, %request.max_output_tokens, "build_request_body: called");
        let contents: Vec<serde_json::Value> = request
            .messages
            .iter()
            .map(|msg| {
                serde_json::json!({
                    "role": msg.role,
                    "parts": msg.parts.iter().map(convert_part).collect::<Vec<_>>(),
                })
            })
            .collect();

        let mut body = serde_json::json!({
            "contents": contents,
            "generation_config": {
                "temperature": request.temperature,
                "max_output_tokens": request.max_output_tokens,
            },
        });

        if let Some(system) = &request.system_prompt {
            body["system_instruction"] = serde_json::json!({
                "parts": [{ "text": system }],
            });
        }

        body
    }

    /// Collapse an API response into the text it carried, if any
    fn parse_response(&self, api_response: GeminiResponse) -> GenerationResponse {
        debug!(candidate_count = %api_response.candidates.len(), "parse_response: called");
        let text = api_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|t| !t.is_empty());

        GenerationResponse { text }
    }

    fn map_transport_error(&self, e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::Timeout(self.timeout)
        } else {
            GenerationError::Network(e)
        }
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, GenerationError> {
        debug!(%self.model, message_count = %request.messages.len(), "generate: called");
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        let body = self.build_request_body(&request);

        let mut last_error = None;
        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let backoff = INITIAL_BACKOFF_MS * 2u64.pow(attempt - 1);
                warn!(attempt, backoff_ms = backoff, "generate: retrying after transient error");
                tokio::time::sleep(Duration::from_millis(backoff)).await;
            }

            let response = match self
                .http
                .post(url.clone())
                .header("x-goog-api-key", self.api_key.clone())
                .header("content-type", "application/json")
                .json(&body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    debug!(attempt, error = %e, "generate: transport error");
                    last_error = Some(self.map_transport_error(e));
                    continue;
                }
            };

            let status = response.status().as_u16();

            if status == 429 {
                debug!("generate: rate limited (429)");
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(60);

                return Err(GenerationError::RateLimited {
                    retry_after: Duration::from_secs(retry_after),
                });
            }

            if is_retryable_status(status) && attempt < MAX_RETRIES {
                let text = response.text().await.unwrap_or_default();
                debug!(attempt, status, "generate: retryable error");
                last_error = Some(GenerationError::ApiError { status, message: text });
                continue;
            }

            if !response.status().is_success() {
                debug!(%status, "generate: API error");
                let text = response.text().await.unwrap_or_default();
                return Err(GenerationError::ApiError { status, message: text });
            }

            debug!("generate: success");
            let api_response: GeminiResponse = response
                .json()
                .await
                .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;
            return Ok(self.parse_response(api_response));
        }

        Err(last_error.unwrap_or_else(|| GenerationError::InvalidResponse("Max retries exceeded".to_string())))
    }
}

/// Convert a content part to its wire representation
fn convert_part(part: &Part) -> serde_json::Value {
    match part {
        Part::Text { text } => serde_json::json!({ "text": text }),
        Part::InlineData { inline_data } => serde_json::json!({
            "inline_data": {
                "mime_type": inline_data.mime_type,
                "data": inline_data.data,
            }
        }),
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}
