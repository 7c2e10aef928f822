//! Text completion handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::{
    adapter::SamplingParams,
    error::BridgeError,
    protocol::provider::{CompletionRequest, CompletionResponse},
    server::state::AppState,
};

/// Handle `POST /v1/completions`
///
/// A missing `prompt` is rejected before any engine call is made.
pub async fn handle_completion(
    State(state): State<AppState>,
    payload: Result<Json<CompletionRequest>, JsonRejection>,
) -> Result<Json<CompletionResponse>, BridgeError> {
    let Json(req) = payload?;
    super::reject_streaming(req.stream)?;

    let prompt = req
        .prompt
        .ok_or_else(|| BridgeError::missing_field("prompt"))?;
    let params = SamplingParams::new(req.max_tokens, req.temperature, req.top_p);

    let response = state.adapter.translate_completion(&prompt, params).await?;
    Ok(Json(response))
}
