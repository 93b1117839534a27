//! List Models use case.
//!
//! Fetches the model catalogue from the server.

use crate::ports::chat_gateway::{ChatGateway, GatewayError};
use revchat_domain::{ApiKey, Model};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors from listing the server's models.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ListModelsError {
    #[error("An API key is required before listing models")]
    MissingCredential,

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Use case for fetching the model catalogue. A credential is required.
pub struct ListModelsUseCase {
    gateway: Arc<dyn ChatGateway>,
}

impl ListModelsUseCase {
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, credential: Option<&ApiKey>) -> Result<Vec<Model>, ListModelsError> {
        let credential = credential.ok_or(ListModelsError::MissingCredential)?;
        let models = self.gateway.list_models(credential).await?;
        debug!("Server offers {} model(s)", models.len());
        Ok(models)
    }
}
