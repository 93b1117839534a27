//! HTTP adapter for the chat API
//!
//! - [`endpoint::Endpoint`]: route construction from base URL and provider
//! - [`gateway::HttpChatGateway`]: [`ChatGateway`](revchat_application::ChatGateway)
//!   implementation over `reqwest`
//! - [`error::HttpError`]: adapter errors, mapped into `GatewayError`

pub mod endpoint;
pub mod error;
pub mod gateway;
