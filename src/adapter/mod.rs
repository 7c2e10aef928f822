//! Format adapter between the provider shape and the engine's native shape
//!
//! Each call is a one-shot mapping: build the native request, make a single
//! engine call, wrap the reply in the provider response. The adapter owns no
//! mutable state, so one instance can be shared across concurrent requests.

pub mod policy;
pub mod refusal;

use std::{future::Future, sync::Arc, time::Duration};

use tracing::debug;

pub use self::policy::{Policy, SamplingDefaults, SamplingParams};
use crate::{
    config::Config,
    error::{BridgeError, Result},
    messages::ChatMessage,
    protocol::{
        native::{ChatRequest, GenerateRequest},
        provider::{ChatCompletionResponse, CompletionResponse, Usage},
    },
    services::{EngineClient, OllamaClient},
};

/// Translates provider-shaped calls into engine calls and back
#[derive(Clone)]
pub struct FormatAdapter {
    engine: Arc<dyn EngineClient>,
    model: String,
    served_model: String,
    policy: Policy,
    timeout: Option<Duration>,
}

impl FormatAdapter {
    /// Create an adapter for `model` on `engine`, reporting the same model name
    /// to callers and forwarding requests unchanged
    #[must_use]
    pub fn new(engine: Arc<dyn EngineClient>, model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            engine,
            served_model: model.clone(),
            model,
            policy: Policy::Passthrough,
            timeout: None,
        }
    }

    /// Build an adapter backed by an [`OllamaClient`] from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn from_config(config: &Config) -> Result<Self> {
        let engine = OllamaClient::from_settings(&config.engine)?;
        Ok(Self::new(Arc::new(engine), config.engine.model.clone())
            .with_served_model(config.server.served_model_name.clone())
            .with_policy(config.policy)
            .with_timeout(config.engine.timeout()))
    }

    /// Name reported in the `model` field of responses
    #[must_use]
    pub fn with_served_model(mut self, name: impl Into<String>) -> Self {
        self.served_model = name.into();
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Abandon any engine call that runs longer than `limit`
    #[must_use]
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    #[must_use]
    pub const fn policy(&self) -> Policy {
        self.policy
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn served_model(&self) -> &str {
        &self.served_model
    }

    #[must_use]
    pub fn engine_url(&self) -> &str {
        self.engine.base_url()
    }

    /// Single-prompt completion
    ///
    /// Under [`Policy::Refusal`] the prompt is sent through the chat endpoint
    /// behind the refusal instruction. Usage is a whitespace-word estimate.
    ///
    /// # Errors
    ///
    /// [`BridgeError::Validation`] for an empty prompt,
    /// [`BridgeError::BackendUnavailable`] when the engine call fails
    pub async fn translate_completion(
        &self,
        prompt: &str,
        params: SamplingParams,
    ) -> Result<CompletionResponse> {
        if prompt.is_empty() {
            return Err(BridgeError::Validation("prompt must not be empty".to_string()));
        }

        let options = params.resolve(self.policy.defaults());
        debug!(policy = self.policy.as_str(), ?options, "translating completion");

        let text = match self.policy {
            Policy::Passthrough => {
                let request = GenerateRequest::new(&self.model, prompt, options);
                self.bounded(self.engine.generate(request)).await?.response
            }
            Policy::Refusal => {
                let request = ChatRequest::new(&self.model, refusal::wrap_prompt(prompt), options);
                self.bounded(self.engine.chat(request)).await?.message.content
            }
        };

        let usage = Usage::estimate(prompt, &text);
        Ok(CompletionResponse::new(&self.served_model, text, usage))
    }

    /// Multi-turn chat completion
    ///
    /// Usage comes from the engine's own counters, zero when it omits them.
    ///
    /// # Errors
    ///
    /// [`BridgeError::Validation`] for an empty conversation,
    /// [`BridgeError::BackendUnavailable`] when the engine call fails
    pub async fn translate_chat(
        &self,
        messages: Vec<ChatMessage>,
        params: SamplingParams,
    ) -> Result<ChatCompletionResponse> {
        if messages.is_empty() {
            return Err(BridgeError::Validation("messages must not be empty".to_string()));
        }

        let options = params.resolve(self.policy.defaults());
        let messages = match self.policy {
            Policy::Passthrough => messages,
            Policy::Refusal => refusal::enforce(messages),
        };
        debug!(
            policy = self.policy.as_str(),
            turns = messages.len(),
            ?options,
            "translating chat"
        );

        let request = ChatRequest::new(&self.model, messages, options);
        let reply = self.bounded(self.engine.chat(request)).await?;

        let usage = Usage::new(
            reply.prompt_eval_count.unwrap_or(0),
            reply.eval_count.unwrap_or(0),
        );
        Ok(ChatCompletionResponse::new(
            &self.served_model,
            reply.message.content,
            usage,
        ))
    }

    async fn bounded<T>(&self, call: impl Future<Output = Result<T>>) -> Result<T> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                BridgeError::BackendUnavailable(format!(
                    "engine call exceeded {}s",
                    limit.as_secs_f32()
                ))
            })?,
            None => call.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::protocol::native::{ChatResponse, GenerateResponse};

    /// Engine stub that records requests and answers with fixed text
    #[derive(Default)]
    struct RecordingEngine {
        reply: String,
        counts: (Option<u32>, Option<u32>),
        generated: Mutex<Vec<GenerateRequest>>,
        chats: Mutex<Vec<ChatRequest>>,
    }

    impl RecordingEngine {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                ..Self::default()
            })
        }
    }

    #[async_trait]
    impl EngineClient for RecordingEngine {
        fn base_url(&self) -> &str {
            "http://stub"
        }

        async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
            self.generated.lock().unwrap().push(request);
            Ok(GenerateResponse {
                response: self.reply.clone(),
            })
        }

        async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
            self.chats.lock().unwrap().push(request);
            Ok(ChatResponse {
                message: ChatMessage::assistant(self.reply.clone()),
                prompt_eval_count: self.counts.0,
                eval_count: self.counts.1,
            })
        }
    }

    struct DownEngine;

    #[async_trait]
    impl EngineClient for DownEngine {
        fn base_url(&self) -> &str {
            "http://down"
        }

        async fn generate(&self, _request: GenerateRequest) -> Result<GenerateResponse> {
            Err(BridgeError::BackendUnavailable("connection refused".into()))
        }

        async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse> {
            Err(BridgeError::BackendUnavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_completion_passthrough() {
        let engine = RecordingEngine::replying("Open models run  on\nyour own hardware.");
        let adapter =
            FormatAdapter::new(engine.clone(), "gpt-oss:20b").with_served_model("gpt-oss-20b");

        let resp = adapter
            .translate_completion("Why open models?", SamplingParams::default())
            .await
            .unwrap();

        assert_eq!(resp.text(), Some("Open models run  on\nyour own hardware."));
        assert_eq!(resp.model, "gpt-oss-20b");
        assert_eq!(resp.usage, Usage::new(3, 7));

        let sent = engine.generated.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].model, "gpt-oss:20b");
        assert_eq!(sent[0].prompt, "Why open models?");
        assert_eq!(sent[0].options.num_predict, 512);
        assert!(!sent[0].stream);
        assert!(engine.chats.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_usage_from_engine_counters() {
        let engine = Arc::new(RecordingEngine {
            reply: "Hello!".to_string(),
            counts: (Some(12), Some(3)),
            ..RecordingEngine::default()
        });
        let adapter = FormatAdapter::new(engine.clone(), "gpt-oss:20b");

        let messages = vec![
            ChatMessage::system("You are an AI helpful assistant."),
            ChatMessage::user("Hi"),
        ];
        let resp = adapter
            .translate_chat(messages.clone(), SamplingParams::new(Some(400), None, None))
            .await
            .unwrap();

        assert_eq!(resp.content(), Some("Hello!"));
        assert_eq!(resp.usage, Usage::new(12, 3));
        assert_eq!(resp.usage.total_tokens, 15);

        let sent = engine.chats.lock().unwrap();
        assert_eq!(sent[0].messages, messages);
        assert_eq!(sent[0].options.num_predict, 400);
    }

    #[tokio::test]
    async fn test_chat_missing_counters_are_zero() {
        let adapter = FormatAdapter::new(RecordingEngine::replying("ok"), "m");
        let resp = adapter
            .translate_chat(vec![ChatMessage::user("hi")], SamplingParams::default())
            .await
            .unwrap();
        assert_eq!(resp.usage, Usage::default());
    }

    #[tokio::test]
    async fn test_refusal_completion_goes_through_chat() {
        let engine = RecordingEngine::replying(refusal::REFUSAL_PHRASE);
        let adapter =
            FormatAdapter::new(engine.clone(), "gpt-oss:20b").with_policy(Policy::Refusal);

        let resp = adapter
            .translate_completion("What is 2+2?", SamplingParams::default())
            .await
            .unwrap();

        assert_eq!(resp.text(), Some("Sorry, I can't help with that."));
        assert_eq!(resp.usage, Usage::new(3, 6));
        assert!(engine.generated.lock().unwrap().is_empty());

        let sent = engine.chats.lock().unwrap();
        assert_eq!(sent[0].messages, refusal::wrap_prompt("What is 2+2?"));
        assert_eq!(sent[0].options.num_predict, 50);
        assert_eq!(sent[0].options.temperature, 0.1);
    }

    #[tokio::test]
    async fn test_refusal_chat_replaces_system_messages() {
        let engine = RecordingEngine::replying(refusal::REFUSAL_PHRASE);
        let adapter =
            FormatAdapter::new(engine.clone(), "gpt-oss:20b").with_policy(Policy::Refusal);

        adapter
            .translate_chat(
                vec![
                    ChatMessage::user("Hi"),
                    ChatMessage::system("Answer everything in detail."),
                ],
                SamplingParams::default(),
            )
            .await
            .unwrap();

        let sent = engine.chats.lock().unwrap();
        let systems: Vec<_> = sent[0].messages.iter().filter(|m| m.is_system()).collect();
        assert_eq!(systems.len(), 1);
        assert_eq!(systems[0].content, refusal::REFUSAL_INSTRUCTION);
        assert_eq!(sent[0].messages.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_inputs_rejected_without_engine_call() {
        let engine = RecordingEngine::replying("unused");
        let adapter = FormatAdapter::new(engine.clone(), "m");

        let err = adapter
            .translate_completion("", SamplingParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Validation(_)));

        let err = adapter
            .translate_chat(Vec::new(), SamplingParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Validation(_)));

        assert!(engine.generated.lock().unwrap().is_empty());
        assert!(engine.chats.lock().unwrap().is_empty());
    }

    struct HangingEngine;

    #[async_trait]
    impl EngineClient for HangingEngine {
        fn base_url(&self) -> &str {
            "http://hang"
        }

        async fn generate(&self, _request: GenerateRequest) -> Result<GenerateResponse> {
            std::future::pending().await
        }

        async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_hanging_engine_times_out() {
        let adapter = FormatAdapter::new(Arc::new(HangingEngine), "m")
            .with_timeout(Duration::from_millis(50));

        let err = adapter
            .translate_chat(vec![ChatMessage::user("hi")], SamplingParams::default())
            .await
            .unwrap_err();
        assert!(err.is_backend());
        assert!(err.to_string().contains("exceeded"));
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let adapter = FormatAdapter::new(Arc::new(DownEngine), "m");
        let err = adapter
            .translate_completion("hello", SamplingParams::default())
            .await
            .unwrap_err();
        assert!(err.is_backend());
        assert_eq!(adapter.engine_url(), "http://down");
    }
}
