//! Error types for relevance sessions.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SliceError>;

/// Errors that end a session or an action.
#[derive(Error, Debug)]
pub enum SliceError {
    /// Repository walk failed.
    #[error("collector error: {0}")]
    Collector(#[from] repo_slice_collector::CollectorError),

    /// Model call failed.
    #[error("model error: {0}")]
    Model(#[from] repo_slice_model::ModelError),

    /// Prompt is too large to send.
    #[error(
        "the prompt's estimated token count ({estimated}) exceeds the maximum allowed ({limit})"
    )]
    TokenBudgetExceeded { estimated: usize, limit: usize },

    /// Tree command is not installed.
    #[error("'{0}' command not found; install it (e.g. 'apt-get install tree' or 'brew install tree')")]
    TreeUnavailable(String),

    /// Tree command ran but failed.
    #[error("tree command exited with {status}: {stderr}")]
    TreeFailed { status: String, stderr: String },

    /// Clipboard command failed.
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// Model alias is not in the configured table.
    #[error("invalid model alias '{alias}'; allowed aliases are: {}", allowed.join(", "))]
    UnknownModelAlias { alias: String, allowed: Vec<String> },

    /// Configuration file could not be used.
    #[error("configuration error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Action applied to a session that already finished.
    #[error("session already finished")]
    SessionFinished,

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
