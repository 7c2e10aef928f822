//! Health and model listing handlers

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{protocol::provider::ModelList, server::state::AppState};

/// Report configuration; the engine itself is not contacted
pub async fn handle_health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": state.adapter.served_model(),
        "engine": {
            "url": state.adapter.engine_url(),
            "model": state.adapter.model(),
        },
        "policy": state.adapter.policy(),
    }))
}

/// Handle `GET /v1/models`
pub async fn handle_models(State(state): State<AppState>) -> Json<ModelList> {
    Json(ModelList::single(state.adapter.served_model()))
}
