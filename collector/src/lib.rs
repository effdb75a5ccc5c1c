//! # File Collector
//!
//! This crate walks a repository and gathers the text that repo-slice sends
//! to the model when asking which files matter for a request.
//!
//! ## Features
//!
//! - **Pruned Walk**: Dependency, build and VCS directories are never entered
//! - **Allow-list**: Only text-like source, config and doc files are read
//! - **Size Caps**: Oversize files are skipped, long files are truncated
//! - **Known Paths**: Every eligible path is remembered for validating answers
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       File Collector                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  CollectorConfig ──► FileCollector ──► CollectedContent         │
//! │       │                   │                  │                  │
//! │       ▼                   ▼                  ▼                  │
//! │  Exclusions/Allow-list  WalkDir     <path>…</path> blocks       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod collector;
pub mod config;
pub mod error;

pub use collector::{CollectedContent, CollectedFile, FileCollector, SkipReason, SkippedFile};
pub use config::CollectorConfig;
pub use error::{CollectorError, Result};

/// Default maximum size of a single collected file (1 MiB).
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 1024 * 1024;

/// Default number of leading lines kept per file.
pub const DEFAULT_MAX_FILE_LINES: usize = 500;
