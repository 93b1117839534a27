//! Domain layer for revchat
//!
//! This crate contains the core conversation state, value objects, and the
//! pure parts of the streaming protocol. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Conversation
//!
//! A [`Conversation`] spans many message exchanges. The remote API assigns it
//! a [`ConversationId`] by prefixing the first streamed response with a
//! [`ControlToken`] (`<id>`). The identifier is adopted once and then sent
//! back with every later request.
//!
//! ## Exchange
//!
//! A [`StreamSession`] tracks one request/response exchange as it moves
//! through [`ExchangeState`]: `Idle → Requesting → Streaming → Completed`,
//! or into `Failed` on the first error.

pub mod config;
pub mod core;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    credential::ApiKey, error::DomainError, message::UserMessage, model::Model,
};
pub use session::{
    control_token::{ControlToken, TokenScan, scan_chunk},
    conversation::{Conversation, ConversationId},
    exchange::{ExchangeState, StreamSession},
    request::{ChatRequest, RequestOptions},
};
