//! Chat session domain.
//!
//! - [`conversation::Conversation`]: state carried across exchanges
//! - [`exchange::StreamSession`]: one request/response exchange
//! - [`control_token`]: extraction of the inline conversation identifier
//! - [`request::ChatRequest`]: the outbound request body

pub mod control_token;
pub mod conversation;
pub mod exchange;
pub mod request;
