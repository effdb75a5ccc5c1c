//! Directory tree rendering via an external command.

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, SliceError};

/// Renders a text tree of a directory for the prompt.
#[async_trait]
pub trait TreeRenderer: Send + Sync {
    /// Render the tree rooted at `root`.
    async fn render(&self, root: &Path) -> Result<String>;
}

/// Runs a `tree`-like program and captures its output.
#[derive(Debug, Clone)]
pub struct CommandTree {
    program: String,
    args: Vec<String>,
}

impl CommandTree {
    /// Create a renderer from a program and its leading arguments.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a `[program, args...]` list; `None` if it is empty.
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }
}

impl Default for CommandTree {
    fn default() -> Self {
        Self::new(
            "tree",
            ["-a", "--gitignore", "-I", ".git"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        )
    }
}

#[async_trait]
impl TreeRenderer for CommandTree {
    async fn render(&self, root: &Path) -> Result<String> {
        debug!("Rendering tree for {} with {}", root.display(), self.program);

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(root)
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => SliceError::TreeUnavailable(self.program.clone()),
                _ => SliceError::Io(e),
            })?;

        if !output.status.success() {
            return Err(SliceError::TreeFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
