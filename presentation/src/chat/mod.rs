//! Interactive chat module
//!
//! Provides a reedline-based interactive chat interface.

mod command;
mod repl;

pub use command::ReplCommand;
pub use repl::ChatRepl;
