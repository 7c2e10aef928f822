//! Interactive chat loop
//!
//! Each line is sent as an independent single-turn conversation; no history is
//! kept between turns.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    adapter::{FormatAdapter, SamplingParams},
    error::{BridgeError, Result},
    messages::ChatMessage,
    services::HostedClient,
};

const PROMPT: &str = "Ask anything (or 'quit'): ";

/// Something that can answer a conversation
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn reply(&self, messages: Vec<ChatMessage>) -> Result<String>;
}

#[async_trait]
impl ChatBackend for FormatAdapter {
    async fn reply(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let response = self
            .translate_chat(messages, SamplingParams::default())
            .await?;
        response
            .content()
            .map(ToString::to_string)
            .ok_or_else(|| BridgeError::BackendUnavailable("engine returned no choices".into()))
    }
}

#[async_trait]
impl ChatBackend for HostedClient {
    async fn reply(&self, messages: Vec<ChatMessage>) -> Result<String> {
        self.complete(messages).await
    }
}

/// Read lines from `input` until EOF or `quit`, writing answers to `output`
///
/// Failed turns are reported inline and the loop continues. Returns the number
/// of turns that were answered.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails
pub async fn run<B, R, W>(
    backend: &B,
    system: Option<&str>,
    input: R,
    output: &mut W,
) -> Result<usize>
where
    B: ChatBackend + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut answered = 0;

    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(line));

        match backend.reply(messages).await {
            Ok(reply) => {
                output.write_all(format!("AI: {reply}\n").as_bytes()).await?;
                answered += 1;
            }
            Err(e) => {
                output.write_all(format!("Error: {e}\n").as_bytes()).await?;
            }
        }
    }

    output.flush().await?;
    Ok(answered)
}
