//! Generation request/response types
//!
//! These types model the Gemini generateContent API but stay
//! provider-agnostic enough for the mock client and future providers.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A generation request - everything needed for one model call
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// System instruction (persona + responsibilities), if any
    pub system_prompt: Option<String>,

    /// Conversation turns, oldest first
    pub messages: Vec<GenMessage>,

    /// Sampling temperature
    pub temperature: f32,

    /// Max tokens for the response
    pub max_output_tokens: u32,
}

impl GenerationRequest {
    /// Build a single-turn request from one prompt string
    pub fn from_prompt(prompt: impl Into<String>, temperature: f32, max_output_tokens: u32) -> Self {
        debug!("GenerationRequest::from_prompt: called");
        Self {
            system_prompt: None,
            messages: vec![GenMessage::user_text(prompt)],
            temperature,
            max_output_tokens,
        }
    }
}

/// One turn of content sent to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenMessage {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl GenMessage {
    /// Create a user turn with a single text part
    pub fn user_text(text: impl Into<String>) -> Self {
        debug!("GenMessage::user_text: called");
        Self {
            role: Role::User,
            parts: vec![Part::text(text)],
        }
    }

    /// Create a user turn with mixed text/image parts
    pub fn user_parts(parts: Vec<Part>) -> Self {
        debug!(part_count = %parts.len(), "GenMessage::user_parts: called");
        Self { role: Role::User, parts }
    }

    /// Create a model turn with a single text part
    pub fn model_text(text: impl Into<String>) -> Self {
        debug!("GenMessage::model_text: called");
        Self {
            role: Role::Model,
            parts: vec![Part::text(text)],
        }
    }
}

/// Turn role, in the wire vocabulary of the generateContent API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A content part - plain text or base64 inline image data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inline_data")]
        inline_data: InlineData,
    },
}

impl Part {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    /// Create an inline image part from already-encoded base64 data
    pub fn inline_image(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        let mime_type = mime_type.into();
        debug!(%mime_type, "Part::inline_image: called");
        Part::InlineData {
            inline_data: InlineData {
                mime_type,
                data: data.into(),
            },
        }
    }
}

/// Base64-encoded media payload with a declared mime type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineData {
    #[serde(rename = "mime_type")]
    pub mime_type: String,
    pub data: String,
}

/// Response from a generation request
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    /// Text content, if the model produced any
    pub text: Option<String>,
}

impl GenerationResponse {
    /// Get the response text, treating whitespace-only content as absent
    pub fn usable_text(&self) -> Option<&str> {
        match self.text.as_deref() {
            Some(t) if !t.trim().is_empty() => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_text_message() {
        let msg = GenMessage::user_text("Hello");
        assert_eq!(msg.role, Role::User);
        assert!(matches!(msg.parts.as_slice(), [Part::Text { text }] if text == "Hello"));
    }

    #[test]
    fn test_model_text_message() {
        let msg = GenMessage::model_text("Hi there");
        assert_eq!(msg.role, Role::Model);
    }

    #[test]
    fn test_from_prompt_single_turn() {
        let req = GenerationRequest::from_prompt("describe a kitchen", 0.7, 2048);
        assert!(req.system_prompt.is_none());
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.temperature, 0.7);
        assert_eq!(req.max_output_tokens, 2048);
    }

    #[test]
    fn test_inline_image_part_serializes_wire_shape() {
        let part = Part::inline_image("image/png", "aGVsbG8=");
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["inline_data"]["mime_type"], "image/png");
        assert_eq!(json["inline_data"]["data"], "aGVsbG8=");
    }

    #[test]
    fn test_usable_text_rejects_blank() {
        assert!(GenerationResponse { text: None }.usable_text().is_none());
        assert!(
            GenerationResponse {
                text: Some("   \n".to_string())
            }
            .usable_text()
            .is_none()
        );
        assert_eq!(
            GenerationResponse {
                text: Some("ok".to_string())
            }
            .usable_text(),
            Some("ok")
        );
    }
}
