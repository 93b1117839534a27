//! Terminal output and transcripts

pub mod console;
pub mod terminal;
pub mod transcript;
