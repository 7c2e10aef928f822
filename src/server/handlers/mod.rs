//! HTTP request handlers for API endpoints

pub mod chat;
pub mod completions;
pub mod health;

pub use chat::handle_chat_completion;
pub use completions::handle_completion;
pub use health::{handle_health, handle_models};

use crate::error::{BridgeError, Result};

/// Streaming is not offered; say so instead of silently buffering
fn reject_streaming(stream: Option<bool>) -> Result<()> {
    if stream == Some(true) {
        return Err(BridgeError::Validation(
            "Streaming is not supported; set \"stream\" to false".to_string(),
        ));
    }
    Ok(())
}
