//! Route construction for the chat API

use super::error::{HttpError, Result};
use reqwest::Url;

/// Resolved routes under `<base-url>/api/v1/<provider>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    chat: Url,
    list_models: Url,
}

impl Endpoint {
    pub fn new(base_url: &str, provider: &str) -> Result<Self> {
        let invalid = |reason: String| HttpError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let mut base = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(invalid("expected an http(s) URL".to_string()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let provider = provider.trim().trim_matches('/');
        if provider.is_empty() {
            return Err(HttpError::EmptyProvider);
        }

        let route = |action: &str| {
            base.join(&format!("api/v1/{}/{}", provider, action))
                .map_err(|e| invalid(e.to_string()))
        };

        Ok(Self {
            chat: route("chat")?,
            list_models: route("list_models")?,
        })
    }

    pub fn chat(&self) -> &Url {
        &self.chat
    }

    pub fn list_models(&self) -> &Url {
        &self.list_models
    }
}
