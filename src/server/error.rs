//! HTTP error mapping

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::error::BridgeError;

impl From<JsonRejection> for BridgeError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "invalid_request_error"),
            Self::BackendUnavailable(_) => (StatusCode::BAD_GATEWAY, "backend_unavailable"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "server_error"),
        };

        let message = self.to_string();
        match &self {
            Self::Validation(_) => {}
            Self::BackendUnavailable(_) => warn!(%message, "engine call failed"),
            _ => error!(%message, "request failed"),
        }

        let body = Json(json!({
            "error": {
                "message": message,
                "type": error_type,
                "param": null,
                "code": null,
            }
        }));

        (status, body).into_response()
    }
}
