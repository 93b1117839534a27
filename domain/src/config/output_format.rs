//! Output format value object

use serde::{Deserialize, Serialize};

/// Display format that streamed Markdown is converted into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown converted to HTML (default)
    #[default]
    Html,
    /// Markdown passed through untouched
    Plain,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Plain => "plain",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "plain" | "markdown" | "md" => Ok(OutputFormat::Plain),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}
