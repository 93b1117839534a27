//! HTTP chat gateway implementation

use super::endpoint::Endpoint;
use super::error::{HttpError, Result};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use revchat_application::{ChatGateway, GatewayError, StreamHandle};
use revchat_domain::util::truncate_str;
use revchat_domain::{ApiKey, ChatRequest, Model};
use std::time::Duration;
use tracing::{debug, info};

/// Longest error body kept in a status error.
const MAX_ERROR_BODY: usize = 512;

/// Chat gateway talking to the reverse-proxy API with `reqwest`
pub struct HttpChatGateway {
    client: reqwest::Client,
    endpoint: Endpoint,
}

impl HttpChatGateway {
    /// Create a gateway with its own client.
    ///
    /// `connect_timeout` bounds connection setup only; streamed bodies may
    /// take as long as the server needs.
    pub fn new(endpoint: Endpoint, connect_timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build().map_err(HttpError::ClientBuild)?;

        info!("HttpChatGateway initialized for {}", endpoint.chat());

        Ok(Self::with_client(client, endpoint))
    }

    /// Create a gateway with an existing client
    pub fn with_client(client: reqwest::Client, endpoint: Endpoint) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn authorization(credential: &ApiKey) -> Result<HeaderValue> {
        let mut value =
            HeaderValue::from_str(credential.expose()).map_err(|_| HttpError::InvalidHeader)?;
        value.set_sensitive(true);
        Ok(value)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(HttpError::Status {
            status: status.as_u16(),
            body: truncate_str(&body, MAX_ERROR_BODY).to_string(),
        })
    }

    async fn send_chat(
        &self,
        request: &ChatRequest,
        credential: &ApiKey,
    ) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(self.endpoint.chat().clone())
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, Self::authorization(credential)?)
            .json(request)
            .send()
            .await
            .map_err(HttpError::Request)?;

        Self::check_status(response).await
    }

    async fn fetch_models(&self, credential: &ApiKey) -> Result<Vec<Model>> {
        let response = self
            .client
            .get(self.endpoint.list_models().clone())
            .header(AUTHORIZATION, Self::authorization(credential)?)
            .send()
            .await
            .map_err(HttpError::Request)?;

        let response = Self::check_status(response).await?;
        let body = response.bytes().await.map_err(HttpError::Body)?;
        let names: Vec<String> =
            serde_json::from_slice(&body).map_err(|e| HttpError::Decode(e.to_string()))?;

        Ok(names.iter().map(|name| Model::from(name.as_str())).collect())
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    async fn open_stream(
        &self,
        request: &ChatRequest,
        credential: &ApiKey,
    ) -> std::result::Result<StreamHandle, GatewayError> {
        let response = self.send_chat(request, credential).await?;

        debug!(
            "Chat stream opened ({}), content-type: {:?}",
            response.status(),
            response.headers().get(CONTENT_TYPE)
        );

        let chunks = response
            .bytes_stream()
            .map(|chunk| {
                chunk
                    .map(|bytes| bytes.to_vec())
                    .map_err(|e| GatewayError::from(HttpError::Body(e)))
            })
            .boxed();

        Ok(StreamHandle::new(chunks))
    }

    async fn list_models(
        &self,
        credential: &ApiKey,
    ) -> std::result::Result<Vec<Model>, GatewayError> {
        Ok(self.fetch_models(credential).await?)
    }
}
