//! Configuration types for file collection.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_MAX_FILE_LINES, DEFAULT_MAX_FILE_SIZE_BYTES};

/// Rules deciding which files end up in a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Allowed extensions (with leading dot, lower-case) and exact file names.
    pub allowed_names: Vec<String>,

    /// Literal names or path fragments that remove a candidate.
    pub excluded_patterns: Vec<String>,

    /// Files larger than this are skipped.
    pub max_file_size_bytes: u64,

    /// Only this many leading lines of a file are kept.
    pub max_file_lines: usize,

    /// Whether to descend into symlinked directories.
    pub follow_symlinks: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            allowed_names: Self::default_allowed_names(),
            excluded_patterns: Self::default_excludes(),
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            max_file_lines: DEFAULT_MAX_FILE_LINES,
            follow_symlinks: false,
        }
    }
}

impl CollectorConfig {
    /// Create a config with the default rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum file size in bytes.
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size_bytes = bytes;
        self
    }

    /// Set the maximum number of lines kept per file.
    pub fn with_max_file_lines(mut self, lines: usize) -> Self {
        self.max_file_lines = lines;
        self
    }

    /// Add an exclusion pattern.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.excluded_patterns.push(pattern.into());
        self
    }

    /// Allow an extension (`.ext`) or an exact file name.
    pub fn allow(mut self, name: impl Into<String>) -> Self {
        self.allowed_names.push(name.into());
        self
    }

    /// Enable following symbolic links.
    pub fn follow_symlinks(mut self) -> Self {
        self.follow_symlinks = true;
        self
    }

    fn default_allowed_names() -> Vec<String> {
        [
            // Languages
            ".ts", ".js", ".py", ".rs", ".go", ".jsx", ".tsx", ".vue", ".svelte", ".java", ".c",
            ".cpp", ".h", ".hpp", ".cs", ".php", ".rb", ".pl", ".sql", ".swift", ".kt", ".dart",
            ".r", ".jl", ".ex", ".exs", ".clj", ".scala", ".groovy", ".coffee",
            // Shell
            ".sh", ".bash", ".zsh",
            // Markup and styles
            ".md", ".txt", ".css", ".scss", ".less", ".html", ".xml",
            // Config
            ".json", ".jsonc", ".yml", ".yaml", ".toml", ".ini", ".env", ".log", ".prettierrc",
            ".eslintrc", ".gitignore", ".gitattributes", ".npmrc", ".nvmrc",
            // Well-known extensionless names
            "Dockerfile", "Makefile", "LICENSE", "README",
        ]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
    }

    fn default_excludes() -> Vec<String> {
        [
            // Lockfiles
            "package-lock.json",
            "bun.lockb",
            "pnpm-lock.yaml",
            "yarn.lock",
            // Dependencies and build output
            "node_modules",
            "dist",
            "build",
            // Version control
            ".git",
            // System files
            ".DS_Store",
            "Thumbs.db",
        ]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
    }

    /// Whether a directory with this name is pruned from the walk.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_patterns.iter().any(|p| p == name)
    }

    /// Whether a file is excluded, given its root-relative path.
    pub fn is_excluded_file(&self, relative_path: &str) -> bool {
        let base_name = base_name(relative_path);
        self.excluded_patterns
            .iter()
            .any(|p| relative_path.contains(p.as_str()) || base_name == p)
    }

    /// Whether a file looks like text worth sending to the model.
    pub fn is_allowed(&self, path: &Path) -> bool {
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()));
        let file_name = path.file_name().map(|n| n.to_string_lossy());

        self.allowed_names.iter().any(|allowed| {
            extension.as_deref() == Some(allowed.as_str())
                || file_name.as_deref() == Some(allowed.as_str())
        })
    }
}

fn base_name(relative_path: &str) -> &str {
    relative_path
        .rsplit('/')
        .next()
        .unwrap_or(relative_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = CollectorConfig::default();
        assert_eq!(config.max_file_size_bytes, 1024 * 1024);
        assert_eq!(config.max_file_lines, 500);
        assert!(!config.follow_symlinks);
    }

    #[test]
    fn test_excluded_dirs_match_exact_names_only() {
        let config = CollectorConfig::default();
        assert!(config.is_excluded_dir("node_modules"));
        assert!(config.is_excluded_dir(".git"));
        assert!(!config.is_excluded_dir("node_modules_backup"));
        assert!(!config.is_excluded_dir("src"));
    }

    #[test]
    fn test_excluded_files() {
        let config = CollectorConfig::default();
        assert!(config.is_excluded_file("package-lock.json"));
        assert!(config.is_excluded_file("web/yarn.lock"));
        assert!(config.is_excluded_file("assets/.DS_Store"));
        // Substring match on the relative path.
        assert!(config.is_excluded_file("scripts/build.ts"));
        assert!(!config.is_excluded_file("src/main.rs"));
    }

    #[test]
    fn test_allowed_by_extension_and_name() {
        let config = CollectorConfig::default();
        assert!(config.is_allowed(Path::new("src/main.rs")));
        assert!(config.is_allowed(Path::new("src/App.TSX")));
        assert!(config.is_allowed(Path::new("Dockerfile")));
        assert!(config.is_allowed(Path::new("docs/README")));
        assert!(config.is_allowed(Path::new(".gitignore")));
        assert!(!config.is_allowed(Path::new("logo.png")));
        assert!(!config.is_allowed(Path::new("dockerfile")));
    }

    #[test]
    fn test_builder() {
        let config = CollectorConfig::new()
            .with_max_file_size(10)
            .with_max_file_lines(3)
            .exclude("fixtures")
            .allow(".proto");

        assert_eq!(config.max_file_size_bytes, 10);
        assert_eq!(config.max_file_lines, 3);
        assert!(config.is_excluded_dir("fixtures"));
        assert!(config.is_allowed(Path::new("api/service.proto")));
    }

    #[test]
    fn test_partial_input_keeps_defaults() {
        let config: CollectorConfig =
            serde_json::from_str(r#"{"max_file_lines": 20}"#).unwrap();
        assert_eq!(config.max_file_lines, 20);
        assert_eq!(config.max_file_size_bytes, 1024 * 1024);
    }
}
