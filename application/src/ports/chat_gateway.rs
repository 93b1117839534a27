//! Chat gateway port
//!
//! Defines the interface for talking to the remote chat API.

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::BoxStream;
use revchat_domain::{ApiKey, ChatRequest, Model};
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("API key is invalid or expired")]
    InvalidCredential,

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Stream read error: {0}")]
    StreamError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Raw body chunks as the transport delivers them.
pub type ChunkStream = BoxStream<'static, Result<Vec<u8>, GatewayError>>;

/// Incremental reader over a streamed response body.
///
/// Each [`read`](Self::read) yields the next chunk, an error, or `None` once
/// the body is complete. Dropping the handle (or calling
/// [`release`](Self::release)) releases the underlying connection.
pub struct StreamHandle {
    chunks: ChunkStream,
}

impl StreamHandle {
    pub fn new(chunks: ChunkStream) -> Self {
        Self { chunks }
    }

    /// Build a handle that replays the given reads in order.
    pub fn from_reads(reads: Vec<Result<Vec<u8>, GatewayError>>) -> Self {
        Self::new(futures::stream::iter(reads).boxed())
    }

    pub async fn read(&mut self) -> Option<Result<Vec<u8>, GatewayError>> {
        self.chunks.next().await
    }

    pub fn release(self) {}
}

/// Gateway for the chat API
///
/// This port defines how the application layer reaches the server.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Send a chat request and return a reader over the streamed body.
    ///
    /// Errors returned here happen before any body bytes were read
    /// (connection failure, non-success status).
    async fn open_stream(
        &self,
        request: &ChatRequest,
        credential: &ApiKey,
    ) -> Result<StreamHandle, GatewayError>;

    /// Fetch the models the server offers.
    async fn list_models(&self, credential: &ApiKey) -> Result<Vec<Model>, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_handle_replays_reads_then_ends() {
        let mut handle = StreamHandle::from_reads(vec![
            Ok(b"a".to_vec()),
            Err(GatewayError::StreamError("reset".to_string())),
        ]);
        assert_eq!(handle.read().await, Some(Ok(b"a".to_vec())));
        assert!(matches!(handle.read().await, Some(Err(GatewayError::StreamError(_)))));
        assert_eq!(handle.read().await, None);
        handle.release();
    }

    #[test]
    fn test_status_error_display() {
        let err = GatewayError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Server returned 502: bad gateway");
    }
}
