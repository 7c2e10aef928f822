//! Chat completion handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::{
    adapter::SamplingParams,
    error::BridgeError,
    protocol::provider::{ChatCompletionRequest, ChatCompletionResponse},
    server::state::AppState,
};

/// Handle `POST /v1/chat/completions`
pub async fn handle_chat_completion(
    State(state): State<AppState>,
    payload: Result<Json<ChatCompletionRequest>, JsonRejection>,
) -> Result<Json<ChatCompletionResponse>, BridgeError> {
    let Json(req) = payload?;
    super::reject_streaming(req.stream)?;

    let messages = req
        .messages
        .ok_or_else(|| BridgeError::missing_field("messages"))?;
    let params = SamplingParams::new(req.max_tokens, req.temperature, req.top_p);

    let response = state.adapter.translate_chat(messages, params).await?;
    Ok(Json(response))
}
