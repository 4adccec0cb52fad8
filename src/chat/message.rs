//! Chat message model

use chrono::{DateTime, Local};

use super::string::{ChatPiece, ChatString};
use super::types::type_label;

/// One classified inbound chat event. Created once per event and never
/// mutated; the dispatching call owns it and shows it to every log.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// Host chat category code
    pub code: u16,
    /// Short category label; empty when the category has no assigned name
    pub label: String,
    /// Host numeric sender id
    pub sender_id: u64,
    /// Structured sender, usually a single player reference
    pub sender: ChatString,
    /// Structured message body
    pub body: ChatString,
    /// Wall clock at delivery
    pub when: DateTime<Local>,
}

impl ChatMessage {
    /// Build a message from the raw inbound event contract: classify the
    /// category and parse both structured payloads.
    pub fn from_event(
        code: u16,
        show_unknown: bool,
        sender_id: u64,
        sender: Vec<ChatPiece>,
        body: Vec<ChatPiece>,
        when: DateTime<Local>,
    ) -> Self {
        Self {
            code,
            label: type_label(code, show_unknown),
            sender_id,
            sender: ChatString::parse(sender),
            body: ChatString::parse(body),
            when,
        }
    }
}
