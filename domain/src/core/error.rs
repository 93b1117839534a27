//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Conversation id cannot be empty")]
    EmptyConversationId,

    #[error("API key cannot be empty")]
    EmptyApiKey,

    #[error("Invalid exchange transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}
