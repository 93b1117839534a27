//! Use cases (application services)

pub mod list_models;
pub mod send_message;
