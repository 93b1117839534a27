//! Conversation event log port
//!
//! Records what happened to each exchange (message sent, identifier
//! assigned, reply completed or failed) as structured events, separate from
//! the `tracing` diagnostics.

use serde_json::Value;
use std::fmt;

/// The kinds of conversation events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationEventKind {
    MessageSent,
    ConversationAssigned,
    ResponseCompleted,
    ResponseFailed,
}

impl ConversationEventKind {
    /// Stable name written to logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationEventKind::MessageSent => "message_sent",
            ConversationEventKind::ConversationAssigned => "conversation_assigned",
            ConversationEventKind::ResponseCompleted => "response_completed",
            ConversationEventKind::ResponseFailed => "response_failed",
        }
    }
}

impl fmt::Display for ConversationEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One event with its event-specific JSON fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationEvent {
    pub kind: ConversationEventKind,
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(kind: ConversationEventKind, payload: Value) -> Self {
        Self { kind, payload }
    }
}

/// Sink for conversation events.
///
/// `log` cannot fail: a broken log must never interrupt an exchange.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Discards every event.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
