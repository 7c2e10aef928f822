//! OpenAI-compatible HTTP surface
//!
//! Routes:
//! - `POST /v1/completions`
//! - `POST /v1/chat/completions`
//! - `GET /v1/models`
//! - `GET /health`

pub mod error;
pub mod handlers;
pub mod state;

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub use self::state::AppState;
use crate::error::Result;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/completions", post(handlers::handle_completion))
        .route("/v1/chat/completions", post(handlers::handle_chat_completion))
        .route("/v1/models", get(handlers::handle_models))
        .route("/health", get(handlers::handle_health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn run_server(state: AppState, addr: SocketAddr) -> Result<()> {
    let app = create_router(state.clone());
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(
        %addr,
        engine = state.adapter.engine_url(),
        model = state.adapter.model(),
        policy = state.adapter.policy().as_str(),
        "ollama-bridge listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
