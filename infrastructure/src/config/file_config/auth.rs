//! Credential configuration from TOML (`[auth]` section)

use revchat_domain::ApiKey;
use serde::{Deserialize, Serialize};

/// Raw credential configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuthConfig {
    /// Environment variable holding the API key (default: "REVCHAT_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
}

impl Default for FileAuthConfig {
    fn default() -> Self {
        Self {
            api_key_env: "REVCHAT_API_KEY".to_string(),
            api_key: None,
        }
    }
}

impl FileAuthConfig {
    /// Resolve the API key: the direct value wins over the env var.
    ///
    /// Blank values count as missing.
    pub fn resolve_api_key(&self) -> Option<ApiKey> {
        self.api_key
            .as_deref()
            .and_then(|key| ApiKey::try_new(key).ok())
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .and_then(|key| ApiKey::try_new(key).ok())
            })
    }
}
