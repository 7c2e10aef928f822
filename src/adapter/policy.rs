//! Request policies and sampling defaults

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::protocol::native::NativeOptions;

/// How the adapter treats inbound requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Forward requests unchanged
    #[default]
    Passthrough,

    /// Force every answer to the fixed refusal phrase
    Refusal,
}

impl Policy {
    /// Sampling values used when the caller omits them
    #[must_use]
    pub const fn defaults(self) -> SamplingDefaults {
        match self {
            Self::Passthrough => SamplingDefaults::GENERAL,
            Self::Refusal => SamplingDefaults::REFUSAL,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passthrough => "passthrough",
            Self::Refusal => "refusal",
        }
    }
}

/// Fallback sampling values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingDefaults {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl SamplingDefaults {
    pub const GENERAL: Self = Self {
        max_tokens: 512,
        temperature: 1.0,
        top_p: 1.0,
    };

    /// Short, low-entropy output
    pub const REFUSAL: Self = Self {
        max_tokens: 50,
        temperature: 0.1,
        top_p: 0.1,
    };
}

/// Sampling values supplied by the caller; passed through without range checks
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SamplingParams {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
}

impl SamplingParams {
    #[must_use]
    pub const fn new(
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        top_p: Option<f32>,
    ) -> Self {
        Self {
            max_tokens,
            temperature,
            top_p,
        }
    }

    /// Fill omitted values from `defaults`
    #[must_use]
    pub fn resolve(self, defaults: SamplingDefaults) -> NativeOptions {
        NativeOptions {
            num_predict: self.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            top_p: self.top_p.unwrap_or(defaults.top_p),
        }
    }
}
