//! Hosted provider client
//!
//! Talks to the OpenAI chat completions API (or any endpoint with the same
//! shape). The API key always comes from the process environment.

use reqwest::{header, Client};
use serde::Serialize;

use crate::{
    config::HostedSettings,
    error::{BridgeError, Result},
    messages::ChatMessage,
    protocol::provider::ChatCompletionResponse,
};

/// Environment variable holding the hosted provider key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Client for the hosted chat completions API
pub struct HostedClient {
    client: Client,
    base_url: String,
    model: String,
}

impl HostedClient {
    /// Create a client with an explicit key
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid header value or the HTTP
    /// client cannot be built
    pub fn new(
        api_key: &str,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .default_headers({
                let mut headers = header::HeaderMap::new();
                headers.insert(
                    header::AUTHORIZATION,
                    header::HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| {
                        BridgeError::ConfigValidation("Invalid API key format".to_string())
                    })?,
                );
                headers
            })
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    /// Create a client reading the key from [`API_KEY_ENV`]
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or empty
    pub fn from_env(settings: &HostedSettings) -> Result<Self> {
        Self::from_key(std::env::var(API_KEY_ENV).ok(), settings)
    }

    /// Create a client from an optional key, as read from the environment
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigValidation`] if the key is absent or empty
    pub fn from_key(api_key: Option<String>, settings: &HostedSettings) -> Result<Self> {
        let api_key = api_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| BridgeError::ConfigValidation(format!("{API_KEY_ENV} is not set")))?;

        Self::new(&api_key, settings.base_url.clone(), settings.model.clone())
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a conversation and return the assistant reply
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status or an
    /// empty choice list
    pub async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = HostedRequest {
            model: &self.model,
            messages,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(BridgeError::Api {
                provider: "openai".to_string(),
                message: format!("HTTP {status}: {error_text}"),
            });
        }

        let api_response: ChatCompletionResponse = response.json().await?;
        api_response
            .content()
            .map(ToString::to_string)
            .ok_or_else(|| BridgeError::Api {
                provider: "openai".to_string(),
                message: "No choices in response".to_string(),
            })
    }
}

#[derive(Debug, Serialize)]
struct HostedRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}
