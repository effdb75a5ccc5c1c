//! # repo-slice core
//!
//! Finds the files in a repository that matter for a natural-language
//! request by asking a model, then lets the user refine and export the
//! answer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Relevance Session                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  TreeRenderer ─┐                                                │
//! │                ├─► PromptBuilder ─► TokenEstimator ─► Model     │
//! │  FileCollector ┘                                       │        │
//! │                                                        ▼        │
//! │  Clipboard ◄── ExportFormatters ◄── RelevantFileList ◄─ Refine  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod clipboard;
pub mod config;
pub mod error;
pub mod export;
pub mod prompt;
pub mod session;
pub mod tokens;
pub mod tree;
pub mod validation;

pub use clipboard::{Clipboard, CommandClipboard};
pub use config::{ResolvedModel, SliceConfig};
pub use error::{Result, SliceError};
pub use export::{ExportFormat, ResponseMode};
pub use prompt::RelevancePrompt;
pub use session::{MenuAction, Outcome, RelevanceSession, SessionState, Transition};
pub use tokens::estimate_tokens;
pub use tree::{CommandTree, TreeRenderer};
pub use validation::{ValidatedFiles, validate_paths};

// Re-export from dependencies for convenience
pub use repo_slice_collector::{CollectedContent, CollectorConfig, FileCollector};
pub use repo_slice_model::{
    GeminiProvider, ModelError, ModelErrorKind, RelevanceModel, RelevantFiles,
};
