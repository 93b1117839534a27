//! Configuration values shared by the loader and the CLI
//!
//! [`OutputFormat`] selects the reply renderer; [`ConfigIssue`] reports
//! problems found while validating a loaded configuration.

mod output_format;
mod validation;

pub use output_format::OutputFormat;
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
