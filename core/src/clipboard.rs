//! System clipboard access through a pipe-based command.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, SliceError};

/// Destination for exported text.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with `text`.
    async fn write(&self, text: &str) -> Result<()>;
}

/// Pipes text into a clipboard program such as `xclip` or `pbcopy`.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Create a clipboard from a program and its arguments.
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

impl Default for CommandClipboard {
    fn default() -> Self {
        Self::new(
            "xclip",
            vec!["-selection".to_string(), "clipboard".to_string()],
        )
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write(&self, text: &str) -> Result<()> {
        debug!("Copying {} bytes with {}", text.len(), self.program);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                SliceError::Clipboard(format!("failed to run {}: {e}", self.program))
            })?;

        // stdin is fed while stderr drains; either pipe can fill first.
        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(text.as_bytes()).await?;
            }
            Ok::<(), std::io::Error>(())
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;
        if !output.status.success() {
            return Err(SliceError::Clipboard(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        fed.map_err(|e| {
            SliceError::Clipboard(format!("failed to write to {}: {e}", self.program))
        })?;

        Ok(())
    }
}
