//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: chat models offered by the server
//! - [`message::UserMessage`]: a validated message to send
//! - [`credential::ApiKey`]: the authorization credential
//! - [`error::DomainError`]: domain-level errors

pub mod credential;
pub mod error;
pub mod message;
pub mod model;
