//! # Relevance Models
//!
//! This crate provides the model side of repo-slice: given a prompt that
//! embeds a repository tree and its contents, a model answers with the list
//! of files relevant to the user's request.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Relevance Models                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  prompt ──► RelevanceModel ──► RelevantFiles                    │
//! │                  │                                              │
//! │                  ▼                                              │
//! │           GeminiProvider (generateContent + response schema)    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod provider;

use serde::{Deserialize, Serialize};

pub use error::{ModelError, ModelErrorKind, Result};
pub use provider::{GeminiProvider, RelevanceModel};

/// Structured answer expected from every model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevantFiles {
    /// Paths the model considers relevant, in its order.
    pub relevant_files: Vec<String>,
}

impl RelevantFiles {
    /// Create an answer from a list of paths.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            relevant_files: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// JSON schema the answer must satisfy, in the OpenAPI subset model
    /// APIs accept for structured output.
    pub fn response_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "OBJECT",
            "properties": {
                "relevant_files": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                }
            },
            "required": ["relevant_files"]
        })
    }
}
