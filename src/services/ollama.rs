//! Ollama engine client
//!
//! Every failure on the way to the engine (connection refused, timeout,
//! non-2xx status, undecodable body) is reported as
//! [`BridgeError::BackendUnavailable`]. Nothing is retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::{
    config::EngineSettings,
    error::{BridgeError, Result},
    protocol::native::{ChatRequest, ChatResponse, GenerateRequest, GenerateResponse},
};

use super::EngineClient;

/// HTTP client for a local Ollama server
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl OllamaClient {
    /// Create a client for `base_url` whose calls are abandoned after `timeout`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Create a client from the engine section of the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    pub fn from_settings(settings: &EngineSettings) -> Result<Self> {
        Self::new(settings.base_url.clone(), settings.timeout())
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{endpoint}", self.base_url);
        debug!(%url, "forwarding request to engine");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(endpoint, &e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(BridgeError::BackendUnavailable(format!(
                "{endpoint} returned HTTP {status}: {error_text}"
            )));
        }

        response.json::<T>().await.map_err(|e| {
            BridgeError::BackendUnavailable(format!("{endpoint} returned an invalid body: {e}"))
        })
    }

    fn transport_error(&self, endpoint: &str, err: &reqwest::Error) -> BridgeError {
        if err.is_timeout() {
            BridgeError::BackendUnavailable(format!(
                "{endpoint} timed out after {}s",
                self.timeout.as_secs_f32()
            ))
        } else {
            BridgeError::BackendUnavailable(format!(
                "{endpoint} unreachable at {}: {err}",
                self.base_url
            ))
        }
    }
}

#[async_trait]
impl EngineClient for OllamaClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        self.post("/api/generate", &request).await
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.post("/api/chat", &request).await
    }
}
