//! Conversation state shared across message exchanges.

use super::request::{ChatRequest, RequestOptions};
use crate::core::error::DomainError;
use crate::core::message::UserMessage;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned conversation identifier.
///
/// Built from user input it is never empty. A control token can carry an
/// empty one (`<>`); it still counts as the conversation's identifier and is
/// sent back as `""`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    pub fn try_new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::EmptyConversationId);
        }
        Ok(Self(id))
    }

    /// Identifier taken from a control token's interior, empty or not.
    pub(crate) fn from_token(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One ongoing conversation with the server.
///
/// The identifier is assigned at most once. [`adopt_id`](Self::adopt_id)
/// ignores later candidates; only [`reset`](Self::reset) clears it, which
/// starts a new conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    id: Option<ConversationId>,
    model: Model,
}

impl Conversation {
    pub fn new(model: Model) -> Self {
        Self { id: None, model }
    }

    pub fn id(&self) -> Option<&ConversationId> {
        self.id.as_ref()
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Switch the model used for the next message.
    pub fn set_model(&mut self, model: Model) {
        self.model = model;
    }

    /// Assign the identifier if none is set yet.
    ///
    /// Returns `true` when `id` was adopted.
    pub fn adopt_id(&mut self, id: ConversationId) -> bool {
        if self.id.is_some() {
            return false;
        }
        self.id = Some(id);
        true
    }

    /// Forget the identifier so the next message opens a new conversation.
    pub fn reset(&mut self) {
        self.id = None;
    }

    /// Build the request body for sending `message` in this conversation.
    pub fn request_for(&self, message: &UserMessage, options: &RequestOptions) -> ChatRequest {
        ChatRequest {
            stream: true,
            model: self.model.clone(),
            message: message.content().to_string(),
            conversation_id: self.id.clone(),
            options: options.clone(),
        }
    }
}
