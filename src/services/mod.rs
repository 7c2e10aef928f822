//! Outbound HTTP clients
//!
//! - [`ollama`]: the local inference engine behind the bridge
//! - [`openai`]: the hosted provider, used directly by the interactive CLI

pub mod ollama;
pub mod openai;

use async_trait::async_trait;

use crate::{
    error::Result,
    protocol::native::{ChatRequest, ChatResponse, GenerateRequest, GenerateResponse},
};

pub use self::{ollama::OllamaClient, openai::HostedClient};

/// Core trait for talking to the local engine
///
/// The adapter only depends on this trait, so tests and alternative transports
/// can stand in for the real HTTP client.
#[async_trait]
pub trait EngineClient: Send + Sync {
    /// Base URL of the engine, for logs and health reports
    fn base_url(&self) -> &str;

    /// Single-prompt completion (`/api/generate`)
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;

    /// Multi-turn chat completion (`/api/chat`)
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;
}
