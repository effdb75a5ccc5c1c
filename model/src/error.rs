//! Error types for model adapters.

use thiserror::Error;

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// What went wrong when asking a model.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelErrorKind {
    /// Provider not configured (missing API key).
    #[error("model provider not configured")]
    NotConfigured,

    /// Request never produced an HTTP response.
    #[error("transport error")]
    Transport,

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// Provider answered with a non-success status.
    #[error("API request failed")]
    Api,

    /// Answer did not match the expected structure.
    #[error("invalid response")]
    InvalidResponse,
}

/// A failed model call: a kind to match on plus a human-readable message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ModelError {
    pub kind: ModelErrorKind,
    pub message: String,
}

impl ModelError {
    /// Create an error of the given kind.
    pub fn new(kind: ModelErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Missing credentials or provider setup.
    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::new(ModelErrorKind::NotConfigured, message)
    }

    /// Malformed or empty answer.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ModelErrorKind::InvalidResponse, message)
    }
}

impl From<reqwest::Error> for ModelError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::invalid_response(err.to_string())
        } else {
            Self::new(ModelErrorKind::Transport, err.to_string())
        }
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_response(err.to_string())
    }
}
