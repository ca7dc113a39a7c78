//! Conversation session state
//!
//! Owns the ordered message history and the batch of uploaded reference
//! images that have not yet been sent to the model. Pending attachments are
//! consumed exactly once: `consume_pending_attachments` returns the batch
//! and clears it atomically, so an upload is never resent on a later turn.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm::Part;

/// Who authored a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One message in the conversation
///
/// Attachments are referenced by filename; the bytes live in the pending
/// batch until consumed and are not retained in history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: MessageRole,
    pub text: String,
    pub attachment_names: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl ConversationMessage {
    /// Create a user message
    pub fn user(text: impl Into<String>, attachment_names: Vec<String>) -> Self {
        debug!(attachment_count = %attachment_names.len(), "ConversationMessage::user: called");
        Self {
            role: MessageRole::User,
            text: text.into(),
            attachment_names,
            timestamp: Utc::now(),
        }
    }

    /// Create an assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        debug!("ConversationMessage::assistant: called");
        Self {
            role: MessageRole::Assistant,
            text: text.into(),
            attachment_names: Vec::new(),
            timestamp: Utc::now(),
        }
    }
}

/// An uploaded reference image: raw bytes plus the original filename
///
/// The core never decodes pixel data. The mime type is derived from the
/// filename suffix and the bytes are base64-encoded when forwarded to the
/// generation capability.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        debug!(%filename, byte_len = %bytes.len(), "Attachment::new: called");
        Self { filename, bytes }
    }

    /// Mime type by filename suffix: .jpg/.jpeg are jpeg, everything else png
    pub fn mime_type(&self) -> &'static str {
        let lower = self.filename.to_lowercase();
        if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
            "image/jpeg"
        } else {
            "image/png"
        }
    }

    /// Convert to an inline-data generation part (base64-encoded)
    pub fn to_part(&self) -> Part {
        debug!(filename = %self.filename, "Attachment::to_part: called");
        Part::inline_image(self.mime_type(), BASE64.encode(&self.bytes))
    }
}

/// A single conversation's state: ordered history plus pending uploads
#[derive(Debug, Default)]
pub struct ConversationSession {
    messages: Vec<ConversationMessage>,
    pending: Vec<Attachment>,
}

impl ConversationSession {
    pub fn new() -> Self {
        debug!("ConversationSession::new: called");
        Self::default()
    }

    /// Append a message to the history
    pub fn append(&mut self, message: ConversationMessage) {
        debug!(role = ?message.role, "ConversationSession::append: called");
        self.messages.push(message);
    }

    /// Ordered message history, oldest first
    pub fn history(&self) -> &[ConversationMessage] {
        &self.messages
    }

    /// Stage an uploaded reference image for the next outgoing request
    pub fn add_attachment(&mut self, attachment: Attachment) {
        debug!(filename = %attachment.filename, "ConversationSession::add_attachment: called");
        self.pending.push(attachment);
    }

    /// Uploads staged but not yet sent
    pub fn pending_attachments(&self) -> &[Attachment] {
        &self.pending
    }

    /// Take the pending batch, clearing it
    ///
    /// This is the single path by which uploads enter an outgoing request;
    /// calling it twice in a row yields the batch once, then nothing.
    pub fn consume_pending_attachments(&mut self) -> Vec<Attachment> {
        debug!(count = %self.pending.len(), "ConversationSession::consume_pending_attachments: called");
        std::mem::take(&mut self.pending)
    }

    /// Clear history and pending attachments
    pub fn reset(&mut self) {
        debug!("ConversationSession::reset: called");
        self.messages.clear();
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_sniffing() {
        assert_eq!(Attachment::new("room.jpg", vec![]).mime_type(), "image/jpeg");
        assert_eq!(Attachment::new("ROOM.JPEG", vec![]).mime_type(), "image/jpeg");
        assert_eq!(Attachment::new("room.png", vec![]).mime_type(), "image/png");
        // Anything that is not jpeg is declared png
        assert_eq!(Attachment::new("room.webp", vec![]).mime_type(), "image/png");
        assert_eq!(Attachment::new("room", vec![]).mime_type(), "image/png");
    }

    #[test]
    fn test_to_part_base64_encodes() {
        let attachment = Attachment::new("room.jpg", b"hello".to_vec());
        let part = attachment.to_part();
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["inline_data"]["mime_type"], "image/jpeg");
        assert_eq!(json["inline_data"]["data"], "aGVsbG8=");
    }

    #[test]
    fn test_history_is_ordered() {
        let mut session = ConversationSession::new();
        session.append(ConversationMessage::user("first", vec![]));
        session.append(ConversationMessage::assistant("second"));
        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].text, "first");
        assert_eq!(history[1].text, "second");
        assert!(history[0].timestamp <= history[1].timestamp);
    }

    #[test]
    fn test_consume_pending_is_exactly_once() {
        let mut session = ConversationSession::new();
        session.add_attachment(Attachment::new("a.jpg", vec![1]));
        session.add_attachment(Attachment::new("b.png", vec![2]));
        assert_eq!(session.pending_attachments().len(), 2);

        let batch = session.consume_pending_attachments();
        assert_eq!(batch.len(), 2);
        assert!(session.pending_attachments().is_empty());

        let second = session.consume_pending_attachments();
        assert!(second.is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = ConversationSession::new();
        session.append(ConversationMessage::user("hi", vec![]));
        session.add_attachment(Attachment::new("a.jpg", vec![1]));

        session.reset();
        assert!(session.history().is_empty());
        assert!(session.pending_attachments().is_empty());
    }
}
