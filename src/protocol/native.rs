//! Ollama request/response types

use serde::{Deserialize, Serialize};

use crate::messages::ChatMessage;

/// Sampling options understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NativeOptions {
    /// Maximum tokens to generate
    pub num_predict: u32,
    pub temperature: f32,
    pub top_p: f32,
}

/// Body for `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub options: NativeOptions,
    pub stream: bool,
}

impl GenerateRequest {
    /// Build a non-streaming single-prompt request
    #[must_use]
    pub fn new(
        model: impl Into<String>,
        prompt: impl Into<String>,
        options: NativeOptions,
    ) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            options,
            stream: false,
        }
    }
}

/// Body for `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub options: NativeOptions,
    pub stream: bool,
}

impl ChatRequest {
    /// Build a non-streaming chat request
    #[must_use]
    pub fn new(
        model: impl Into<String>,
        messages: Vec<ChatMessage>,
        options: NativeOptions,
    ) -> Self {
        Self {
            model: model.into(),
            messages,
            options,
            stream: false,
        }
    }
}

/// Reply from `/api/generate`; other engine fields are ignored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
}

/// Reply from `/api/chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: ChatMessage,

    /// Tokens consumed by the prompt, when the engine reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u32>,

    /// Tokens generated, when the engine reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u32>,
}
