//! Renderings of the relevant file list for the clipboard.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex_lite::Regex;
use repo_slice_collector::collector::resolve;
use repo_slice_collector::{CollectorConfig, FileCollector, SkipReason};
use tracing::warn;

use crate::error::Result;

/// How a third-party assistant should answer when handed a content export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// Ask for unified diffs.
    Diff,
    /// Let the assistant answer freely.
    Normal,
}

impl ResponseMode {
    fn directive(self) -> &'static str {
        match self {
            Self::Diff => {
                "Respond with your changes as unified diffs against the files below. \
                 Show only the hunks that change, with enough context lines to apply \
                 them, and do not repeat unchanged files."
            }
            Self::Normal => {
                "Respond in whatever form fits the request best: explanations, \
                 snippets, or complete files."
            }
        }
    }
}

/// The export choices offered after analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Request, tree and flattened file contents.
    Content(ResponseMode),
    /// Pretty-printed JSON array of paths.
    Json,
    /// `@path` tokens separated by spaces.
    AtFile,
    /// One path per line.
    Newline,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Content(_) => f.write_str("file contents"),
            Self::Json => f.write_str("JSON array"),
            Self::AtFile => f.write_str("@file format"),
            Self::Newline => f.write_str("newline-separated list"),
        }
    }
}

/// Paths as a pretty-printed JSON array.
pub fn to_json(files: &[String]) -> Result<String> {
    Ok(serde_json::to_string_pretty(files)?)
}

/// Paths as `@a @b`.
pub fn to_at_file(files: &[String]) -> String {
    files
        .iter()
        .map(|f| format!("@{f}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Paths one per line.
pub fn to_newline(files: &[String]) -> String {
    files.join("\n")
}

/// Everything a content export needs besides the file list.
pub struct ContentExport<'a> {
    /// Root the listed paths are relative to.
    pub root: &'a Path,
    /// The user's original request.
    pub request: &'a str,
    /// Rendered directory tree.
    pub tree: &'a str,
    /// Answer style directive.
    pub mode: ResponseMode,
    /// Allow-list and size limit applied when re-reading files.
    pub collector: &'a CollectorConfig,
}

impl ContentExport<'_> {
    /// Render the header and one flattened line per file.
    pub fn render(&self, files: &[String]) -> String {
        let lines: Vec<String> = files.iter().map(|path| self.file_line(path)).collect();

        format!(
            "# Response Mode\n{}\n\n# User Request\n{}\n\n# File Tree\n{}\n\n# Relevant Files\n{}\n",
            self.mode.directive(),
            self.request,
            self.tree.trim_end(),
            lines.join("\n")
        )
    }

    fn file_line(&self, path: &str) -> String {
        let full_path = resolve(self.root, path);
        if !self.collector.is_allowed(&full_path) {
            return path.to_string();
        }

        // Exports keep whole files; only the size limit applies.
        let reader = FileCollector::new(
            self.collector
                .clone()
                .with_max_file_lines(usize::MAX),
        );
        match reader.read_truncated(&full_path) {
            Ok((text, _)) => format!("<{path}> {}", flatten(&text)),
            Err(SkipReason::TooLarge { size, limit }) => {
                warn!("Exporting path only for {path}: {size} bytes exceeds {limit}");
                path.to_string()
            }
            Err(SkipReason::Unreadable(message)) => {
                warn!("Could not read file {path}: {message}");
                path.to_string()
            }
        }
    }
}

static LINE_BREAKS: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[\r\n]+").ok());

/// Collapse every run of line breaks into one space.
fn flatten(text: &str) -> String {
    match LINE_BREAKS.as_ref() {
        Some(re) => re.replace_all(text, " ").into_owned(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn strings(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| (*p).to_string()).collect()
    }

    #[test]
    fn test_json_round_trip() {
        let files = strings(&["x", "y"]);
        let json = to_json(&files).unwrap();

        assert!(json.contains('\n'));
        let parsed: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, files);
    }

    #[test]
    fn test_at_file_and_newline() {
        let files = strings(&["x", "y"]);
        assert_eq!(to_at_file(&files), "@x @y");
        assert_eq!(to_newline(&files), "x\ny");
        assert_eq!(to_at_file(&[]), "");
    }

    #[test]
    fn test_flatten() {
        assert_eq!(flatten("a\r\n\r\nb\nc"), "a b c");
        assert_eq!(flatten("no breaks"), "no breaks");
        assert_eq!(flatten("\nlead\r\rtrail\n"), " lead trail ");
    }

    #[test]
    fn test_content_export() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("src")).unwrap();
        std::fs::write(temp_dir.path().join("src/a.ts"), "line one\nline two\n").unwrap();
        std::fs::write(temp_dir.path().join("logo.png"), [0u8, 1, 2]).unwrap();

        let collector = CollectorConfig::default();
        let export = ContentExport {
            root: temp_dir.path(),
            request: "rename the helper",
            tree: ".\n├── logo.png\n└── src\n",
            mode: ResponseMode::Diff,
            collector: &collector,
        };

        let block = export.render(&strings(&["src/a.ts", "logo.png", "src/gone.ts"]));

        assert!(block.starts_with("# Response Mode\nRespond with your changes as unified diffs"));
        assert!(block.contains("# User Request\nrename the helper\n"));
        assert!(block.contains("# File Tree\n.\n├── logo.png\n└── src\n\n"));
        assert!(block.ends_with(
            "# Relevant Files\n<src/a.ts> line one line two \nlogo.png\nsrc/gone.ts\n"
        ));
    }

    #[test]
    fn test_normal_mode_directive() {
        let collector = CollectorConfig::default();
        let export = ContentExport {
            root: Path::new("."),
            request: "r",
            tree: "t",
            mode: ResponseMode::Normal,
            collector: &collector,
        };
        assert!(export.render(&[]).contains("Respond in whatever form"));
    }
}
