//! Configuration for relevance sessions.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use repo_slice_collector::CollectorConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SliceError};

/// Default cap on the estimated size of the initial prompt.
pub const DEFAULT_MAX_PROMPT_TOKENS: usize = 1_000_000;

/// Immutable settings handed to every component of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceConfig {
    /// File selection rules.
    pub collector: CollectorConfig,

    /// Prompts estimated at or above this many tokens are never sent.
    pub max_prompt_tokens: usize,

    /// Alias used when no model is selected.
    pub default_model: String,

    /// Model aliases to model names.
    pub models: BTreeMap<String, String>,

    /// Program and arguments that render the directory tree; the root is
    /// appended as the last argument.
    pub tree_command: Vec<String>,

    /// Program and arguments that read clipboard text from stdin.
    pub clipboard_command: Vec<String>,
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self {
            collector: CollectorConfig::default(),
            max_prompt_tokens: DEFAULT_MAX_PROMPT_TOKENS,
            default_model: "2".to_string(),
            models: BTreeMap::from([
                ("2".to_string(), "gemini-2.0-flash-001".to_string()),
                (
                    "2.5".to_string(),
                    "gemini-2.5-flash-preview-05-20".to_string(),
                ),
            ]),
            tree_command: ["tree", "-a", "--gitignore", "-I", ".git"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            clipboard_command: ["xclip", "-selection", "clipboard"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

/// A model alias resolved against the alias table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    pub alias: String,
    pub name: String,
}

impl SliceConfig {
    /// Set the file selection rules.
    pub fn with_collector(mut self, collector: CollectorConfig) -> Self {
        self.collector = collector;
        self
    }

    /// Set the prompt token budget.
    pub fn with_max_prompt_tokens(mut self, tokens: usize) -> Self {
        self.max_prompt_tokens = tokens;
        self
    }

    /// Per-user config file location, if the platform has one.
    pub fn default_location() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("repo-slice").join("config.toml"))
    }

    /// Load a config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| SliceError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| SliceError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load `explicit` if given, else the per-user file if it exists, else
    /// the defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_location() {
            Some(path) if path.is_file() => {
                debug!("Loading config from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Map an optional alias to a model name.
    pub fn resolve_model(&self, alias: Option<&str>) -> Result<ResolvedModel> {
        let alias = alias.unwrap_or(self.default_model.as_str());
        match self.models.get(alias) {
            Some(name) => Ok(ResolvedModel {
                alias: alias.to_string(),
                name: name.clone(),
            }),
            None => Err(SliceError::UnknownModelAlias {
                alias: alias.to_string(),
                allowed: self.models.keys().cloned().collect(),
            }),
        }
    }
}
