//! ollama-bridge: OpenAI-compatible front end for a local Ollama engine
//!
//! Clients written against the hosted chat/completion API can point at this
//! server instead; requests are reshaped into Ollama's native schema, forwarded
//! to the local engine, and the replies reshaped back.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod adapter;
pub mod cli;
pub mod config;
pub mod error;
pub mod messages;
pub mod protocol;
pub mod server;
pub mod services;

// Re-exports for convenience
pub use adapter::{FormatAdapter, Policy, SamplingParams};
pub use error::{BridgeError, Result};
