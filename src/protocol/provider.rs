//! OpenAI-compatible request/response types

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::messages::ChatMessage;

/// Terminal reason reported on every choice
pub const FINISH_REASON_STOP: &str = "stop";

/// Body of `POST /v1/completions`
///
/// Every field is optional at the serde level so a missing `prompt` can be
/// reported by name instead of as a generic decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Accepted for compatibility; the configured model is always used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

/// Body of `POST /v1/chat/completions`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<ChatMessage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl Usage {
    #[must_use]
    pub const fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }

    /// Estimate usage by counting whitespace-delimited words.
    ///
    /// This is an approximation, not a tokenizer.
    #[must_use]
    pub fn estimate(prompt: &str, completion: &str) -> Self {
        Self::new(word_count(prompt), word_count(completion))
    }
}

fn word_count(text: &str) -> u32 {
    u32::try_from(text.split_whitespace().count()).unwrap_or(u32::MAX)
}

/// Choice of a text completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionChoice {
    pub text: String,
    pub index: u32,
    pub finish_reason: String,
}

/// Response of `POST /v1/completions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<CompletionChoice>,
    pub usage: Usage,
}

impl CompletionResponse {
    /// Wrap engine output as a single-choice text completion
    #[must_use]
    pub fn new(model: impl Into<String>, text: impl Into<String>, usage: Usage) -> Self {
        Self {
            id: format!("cmpl-{}", Uuid::new_v4()),
            object: "text_completion".to_string(),
            created: Utc::now().timestamp(),
            model: model.into(),
            choices: vec![CompletionChoice {
                text: text.into(),
                index: 0,
                finish_reason: FINISH_REASON_STOP.to_string(),
            }],
            usage,
        }
    }

    /// Text of the first choice
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.choices.first().map(|choice| choice.text.as_str())
    }
}

/// Choice of a chat completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: String,
}

/// Response of `POST /v1/chat/completions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Usage,
}

impl ChatCompletionResponse {
    /// Wrap engine output as a single assistant choice
    #[must_use]
    pub fn new(model: impl Into<String>, content: impl Into<String>, usage: Usage) -> Self {
        Self {
            id: format!("chatcmpl-{}", Uuid::new_v4()),
            object: "chat.completion".to_string(),
            created: Utc::now().timestamp(),
            model: model.into(),
            choices: vec![ChatChoice {
                index: 0,
                message: ChatMessage::assistant(content),
                finish_reason: FINISH_REASON_STOP.to_string(),
            }],
            usage,
        }
    }

    /// Content of the first choice
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
    }
}

/// Entry of `GET /v1/models`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCard {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub owned_by: String,
}

/// Response of `GET /v1/models`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelList {
    pub object: String,
    pub data: Vec<ModelCard>,
}

impl ModelList {
    /// List containing only the served model
    #[must_use]
    pub fn single(model: impl Into<String>) -> Self {
        Self {
            object: "list".to_string(),
            data: vec![ModelCard {
                id: model.into(),
                object: "model".to_string(),
                created: Utc::now().timestamp(),
                owned_by: "ollama".to_string(),
            }],
        }
    }
}
