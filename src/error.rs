//! Error types for ollama-bridge

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`BridgeError`]
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Main error type for ollama-bridge
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A required field is absent or malformed in an inbound request
    #[error("{0}")]
    Validation(String),

    /// The local engine could not be reached, timed out, or answered with a failure
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Hosted provider API error
    #[error("API error ({provider}): {message}")]
    Api { provider: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parse error
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Configuration validation error
    #[error("Invalid configuration: {0}")]
    ConfigValidation(String),

    /// HTTP request error outside of engine calls
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BridgeError {
    /// Shorthand for a missing inbound field
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("Missing required field: {field}"))
    }

    /// Check whether this error came from the local engine
    #[must_use]
    pub const fn is_backend(&self) -> bool {
        matches!(self, Self::BackendUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = BridgeError::missing_field("prompt");
        assert_eq!(err.to_string(), "Missing required field: prompt");
        assert!(!err.is_backend());
    }

    #[test]
    fn test_backend_unavailable_display() {
        let err = BridgeError::BackendUnavailable("connection refused".into());
        assert!(err.is_backend());
        assert_eq!(err.to_string(), "Backend unavailable: connection refused");
    }
}
