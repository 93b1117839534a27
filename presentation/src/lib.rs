//! Presentation layer for revchat
//!
//! This crate contains the CLI definition, the interactive REPL, the terminal
//! display surface, progress spinners and the HTML transcript writer.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::Cli;
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use output::terminal::TerminalSurface;
pub use output::transcript::TranscriptWriter;
pub use progress::reporter::ProgressReporter;
