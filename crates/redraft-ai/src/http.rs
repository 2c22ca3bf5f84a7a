//! HTTP-backed transformer client.

use async_trait::async_trait;
use tracing::debug;

use crate::client::{GenerationRequest, GenerationResponse, TextTransformer};
use crate::error::TransformError;

/// Posts generation requests to an endpoint speaking the
/// `GenerationRequest` / `GenerationResponse` wire contract.
#[derive(Clone)]
pub struct HttpTransformer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransformer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// Use a preconfigured client (proxies, auth headers, ...).
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl TextTransformer for HttpTransformer {
    async fn generate(&self, request: GenerationRequest) -> Result<String, TransformError> {
        debug!(endpoint = %self.endpoint, "sending generation request");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|err| TransformError::Api(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransformError::Api(format!(
                "generation endpoint returned {status}"
            )));
        }
        let body: GenerationResponse = response
            .json()
            .await
            .map_err(|err| TransformError::Api(err.to_string()))?;
        if body.result.trim().is_empty() {
            return Err(TransformError::EmptyResult);
        }
        Ok(body.result)
    }
}
