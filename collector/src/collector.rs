//! Repository walking and content collection.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::CollectorConfig;
use crate::error::{CollectorError, Result};

/// A file whose (truncated) text was collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedFile {
    /// Path relative to the walk root, `/`-separated.
    pub path: String,

    /// Leading lines of the file.
    pub content: String,

    /// Whether lines were dropped to respect the line limit.
    pub truncated: bool,
}

impl CollectedFile {
    /// Render the file as a `<path>…</path>` block.
    pub fn render(&self) -> String {
        format!("<{path}>\n{}\n</{path}>", self.content, path = self.path)
    }
}

/// Why an eligible file was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// File exceeded the configured size limit.
    TooLarge { size: u64, limit: u64 },

    /// File could not be read.
    Unreadable(String),
}

/// An eligible file that was left out of the collected content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Path relative to the walk root.
    pub path: String,

    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Output of a collection run, in traversal order.
#[derive(Debug, Clone, Default)]
pub struct CollectedContent {
    files: Vec<CollectedFile>,
    known_paths: BTreeSet<String>,
    skipped: Vec<SkippedFile>,
}

impl CollectedContent {
    /// Collected files in traversal order.
    pub fn files(&self) -> &[CollectedFile] {
        &self.files
    }

    /// Every non-excluded file path the walk saw.
    pub fn known_paths(&self) -> &BTreeSet<String> {
        &self.known_paths
    }

    /// Whether the walk saw this path.
    pub fn is_known(&self, path: &str) -> bool {
        self.known_paths.contains(path)
    }

    /// Eligible files that were left out.
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Number of collected files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// All collected blocks joined by a blank line.
    pub fn concatenated(&self) -> String {
        self.files
            .iter()
            .map(CollectedFile::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Walks a directory and collects eligible file contents.
pub struct FileCollector {
    config: CollectorConfig,
}

impl FileCollector {
    /// Create a new collector.
    pub fn new(config: CollectorConfig) -> Self {
        Self { config }
    }

    /// Walk `root` depth-first and collect every eligible file.
    pub fn collect(&self, root: &Path) -> Result<CollectedContent> {
        if !root.exists() {
            return Err(CollectorError::RootNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(CollectorError::NotADirectory(root.to_path_buf()));
        }

        let start = std::time::Instant::now();
        let mut content = CollectedContent::default();

        let walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !self
                        .config
                        .is_excluded_dir(&entry.file_name().to_string_lossy())
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(CollectorError::Walk {
                        path: root.to_path_buf(),
                        source: err,
                    });
                }
                Err(err) => {
                    warn!("Skipping unreadable entry: {err}");
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }
            if entry.path_is_symlink() && entry.path().is_dir() {
                debug!("Skipping linked directory {}", entry.path().display());
                continue;
            }

            let relative = relative_path(root, entry.path());
            if self.config.is_excluded_file(&relative) {
                debug!("Excluded {relative}");
                continue;
            }

            content.known_paths.insert(relative.clone());

            if !self.config.is_allowed(entry.path()) {
                continue;
            }

            match self.read_truncated(entry.path()) {
                Ok((text, truncated)) => content.files.push(CollectedFile {
                    path: relative,
                    content: text,
                    truncated,
                }),
                Err(reason) => {
                    match &reason {
                        SkipReason::TooLarge { size, .. } => warn!(
                            "Skipping large file: {relative} ({:.2} MB)",
                            *size as f64 / (1024.0 * 1024.0)
                        ),
                        SkipReason::Unreadable(message) => {
                            warn!("Could not read file {relative}: {message}")
                        }
                    }
                    content.skipped.push(SkippedFile {
                        path: relative,
                        reason,
                    });
                }
            }
        }

        info!(
            "Collected {} files from {} in {:?} ({} skipped)",
            content.files.len(),
            root.display(),
            start.elapsed(),
            content.skipped.len()
        );

        Ok(content)
    }

    /// Read a file within the size limit, keeping its leading lines.
    pub fn read_truncated(&self, path: &Path) -> std::result::Result<(String, bool), SkipReason> {
        let size = fs::metadata(path)
            .map_err(|e| SkipReason::Unreadable(e.to_string()))?
            .len();
        if size > self.config.max_file_size_bytes {
            return Err(SkipReason::TooLarge {
                size,
                limit: self.config.max_file_size_bytes,
            });
        }

        let bytes = fs::read(path).map_err(|e| SkipReason::Unreadable(e.to_string()))?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(truncate_lines(&text, self.config.max_file_lines))
    }
}

/// Keep the first `max_lines` `\n`-separated lines of `text`.
pub fn truncate_lines(text: &str, max_lines: usize) -> (String, bool) {
    let mut lines = text.split('\n');
    let kept: Vec<&str> = lines.by_ref().take(max_lines).collect();
    let truncated = lines.next().is_some();
    (kept.join("\n"), truncated)
}

/// Root-relative, `/`-separated form of `path`.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolve a root-relative path produced by [`relative_path`].
pub fn resolve(root: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(root.to_path_buf(), |path, part| path.join(part))
}
