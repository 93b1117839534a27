//! Infrastructure layer for revchat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod http;
pub mod logging;
pub mod render;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileAuthConfig, FileChatConfig, FileConfig, FileLoggingConfig,
    FileOutputConfig, FileReplConfig, FileServerConfig,
};
pub use http::{
    endpoint::Endpoint,
    error::{HttpError, Result},
    gateway::HttpChatGateway,
};
pub use logging::JsonlConversationLogger;
pub use render::{MarkdownRenderer, PlainRenderer, renderer_for};
