//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to domain types on access.

mod auth;
mod chat;
mod logging;
mod output;
mod repl;
mod server;

pub use auth::FileAuthConfig;
pub use chat::FileChatConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;
pub use server::FileServerConfig;

use revchat_domain::{ConfigIssue, ConfigIssueCode, OutputFormat};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Server location
    pub server: FileServerConfig,
    /// Credential sources
    pub auth: FileAuthConfig,
    /// Model and request options
    pub chat: FileChatConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Conversation log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// The output format, falling back to the default on unknown values.
    ///
    /// Unknown values are reported by [`validate`](Self::validate).
    pub fn output_format(&self) -> OutputFormat {
        self.output
            .format
            .as_deref()
            .and_then(|f| f.parse().ok())
            .unwrap_or_default()
    }

    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Server location
        let base_url = self.server.base_url.trim();
        if base_url.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "server.base_url".to_string(),
                },
                "server.base_url must not be empty",
            ));
        } else if let Err(e) = reqwest::Url::parse(base_url) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidUrl {
                    field: "server.base_url".to_string(),
                    value: base_url.to_string(),
                },
                format!("server.base_url: cannot parse '{}': {}", base_url, e),
            ));
        }

        if self.server.provider.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "server.provider".to_string(),
                },
                "server.provider must not be empty",
            ));
        }

        // 2. Model name
        if let Some(model) = &self.chat.model
            && model.trim().is_empty()
        {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyValue {
                    field: "chat.model".to_string(),
                },
                "chat.model is empty, using the default model",
            ));
        }

        // 3. Output format
        if let Some(format) = &self.output.format
            && format.parse::<OutputFormat>().is_err()
        {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidEnumValue {
                    field: "output.format".to_string(),
                    value: format.clone(),
                    valid_values: vec!["html".to_string(), "plain".to_string()],
                },
                format!(
                    "output.format: unknown value '{}', falling back to 'html'",
                    format
                ),
            ));
        }

        issues
    }
}
