//! Server configuration from TOML (`[server]` section)

use serde::{Deserialize, Serialize};

/// Raw server configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Base URL of the chat API, without the `/api/v1` prefix.
    pub base_url: String,
    /// Provider path segment: requests go to `/api/v1/<provider>/chat`.
    pub provider: String,
    /// TCP connect timeout. There is no overall request timeout.
    pub connect_timeout_secs: Option<u64>,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:6238".to_string(),
            provider: "claude".to_string(),
            connect_timeout_secs: Some(10),
        }
    }
}
