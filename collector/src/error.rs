//! Error types for the file collector.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Errors that abort a collection run.
///
/// Problems with individual files are never errors; they are logged and
/// recorded as [`crate::SkippedFile`] entries instead.
#[derive(Error, Debug)]
pub enum CollectorError {
    /// Walk root does not exist.
    #[error("directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// Walk root exists but is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The walk root itself could not be read.
    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
