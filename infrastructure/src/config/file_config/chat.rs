//! Chat configuration from TOML (`[chat]` section)

use revchat_domain::{Model, RequestOptions};
use serde::{Deserialize, Serialize};

/// Raw chat configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Model identifier (default: claude-3-5-sonnet-20240620)
    pub model: Option<String>,
    /// Upstream client pool (`client_type` request field)
    pub client_type: Option<String>,
    /// Upstream client index (`client_idx` request field)
    pub client_idx: Option<u32>,
    pub need_web_search: bool,
    pub need_artifacts: bool,
}

impl FileChatConfig {
    /// The configured model, or the default when unset or blank.
    pub fn model(&self) -> Model {
        match self.model.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Model::from(name),
            _ => Model::default(),
        }
    }

    pub fn request_options(&self) -> RequestOptions {
        RequestOptions {
            client_type: self.client_type.clone(),
            client_idx: self.client_idx,
            need_web_search: self.need_web_search,
            need_artifacts: self.need_artifacts,
        }
    }
}
