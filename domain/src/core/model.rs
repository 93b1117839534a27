//! Model value object representing a chat model offered by the server

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Chat models known to the reverse-proxy API (Value Object)
///
/// The server accepts any identifier string; unknown ones are carried as
/// [`Model::Custom`] and passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Claude3Sonnet,
    Claude3Haiku,
    Claude3Opus,
    Claude35Sonnet,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Claude3Sonnet => "claude-3-sonnet-20240229",
            Model::Claude3Haiku => "claude-3-haiku-20240307",
            Model::Claude3Opus => "claude-3-opus-20240229",
            Model::Claude35Sonnet => "claude-3-5-sonnet-20240620",
            Model::Custom(s) => s,
        }
    }

    /// All models with a dedicated variant, in catalogue order
    pub fn known_models() -> Vec<Model> {
        vec![
            Model::Claude3Sonnet,
            Model::Claude3Haiku,
            Model::Claude3Opus,
            Model::Claude35Sonnet,
        ]
    }

    /// Whether a basic-tier API key may use this model.
    ///
    /// Every other known model needs a plus-tier key. Custom models are
    /// assumed to need plus, the server decides either way.
    pub fn is_basic_tier(&self) -> bool {
        matches!(self, Model::Claude3Sonnet)
    }
}

impl Default for Model {
    /// Returns the default model (Claude 3.5 Sonnet)
    fn default() -> Self {
        Model::Claude35Sonnet
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "claude-3-sonnet-20240229" => Model::Claude3Sonnet,
            "claude-3-haiku-20240307" => Model::Claude3Haiku,
            "claude-3-opus-20240229" => Model::Claude3Opus,
            "claude-3-5-sonnet-20240620" => Model::Claude35Sonnet,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}
