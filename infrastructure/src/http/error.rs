//! Error types for the HTTP adapter

use revchat_application::GatewayError;
use thiserror::Error;

/// Result type alias for HTTP adapter operations
pub type Result<T> = std::result::Result<T, HttpError>;

/// Status the server uses for an unknown or expired API key.
pub const STATUS_API_KEY_INVALID: u16 = 480;

/// Errors that can occur when talking to the chat API over HTTP
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Provider path segment cannot be empty")]
    EmptyProvider,

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("API key contains characters not allowed in a header")]
    InvalidHeader,

    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl HttpError {
    /// Whether the server rejected the credential.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(
            self,
            HttpError::Status { status, .. }
                if *status == STATUS_API_KEY_INVALID || *status == 401 || *status == 403
        )
    }
}

impl From<HttpError> for GatewayError {
    fn from(err: HttpError) -> Self {
        if err.is_auth_rejection() || matches!(err, HttpError::InvalidHeader) {
            return GatewayError::InvalidCredential;
        }
        match err {
            HttpError::Status { status, body } => GatewayError::Status { status, body },
            HttpError::Body(e) => GatewayError::StreamError(e.to_string()),
            HttpError::Decode(msg) => GatewayError::InvalidResponse(msg),
            other => GatewayError::ConnectionError(other.to_string()),
        }
    }
}
