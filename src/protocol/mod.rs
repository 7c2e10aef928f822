//! Wire schemas on both sides of the bridge
//!
//! - [`provider`]: the OpenAI-style shapes exposed to inbound callers
//! - [`native`]: the Ollama shapes sent to and received from the local engine

pub mod native;
pub mod provider;
