//! The relevance session state machine.
//!
//! A session is opened once per run. Opening walks the repository, builds
//! the analysis prompt, checks it against the token budget and asks the model
//! for the first answer. From then on the caller presents [`RelevanceSession::files`]
//! and feeds user choices to [`RelevanceSession::apply`] until it reports
//! [`Transition::Finished`].
//!
//! ```text
//! Collecting ─► Prompting ─► AwaitingModel ─► Presenting ─┬─► Exporting ─► Done
//!                                                ▲         ├─► Refining ──┐
//!                                                └─────────┼──────────────┘
//!                                                          └─► Exit ──────► Done
//! ```

use std::path::{Path, PathBuf};

use repo_slice_collector::{CollectedContent, FileCollector};
use repo_slice_model::RelevanceModel;
use tracing::{info, warn};

use crate::clipboard::Clipboard;
use crate::config::SliceConfig;
use crate::error::{Result, SliceError};
use crate::export::{self, ContentExport, ExportFormat};
use crate::prompt::{self, RelevancePrompt};
use crate::tokens::estimate_tokens;
use crate::tree::TreeRenderer;
use crate::validation::validate_paths;

/// Where the session is in its lifecycle once opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Showing the current file list and waiting for an action.
    Presenting,
    /// Exported or exited; no further actions are accepted.
    Done,
}

/// A user choice from the post-analysis menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Copy the file list in the given format and finish.
    Export(ExportFormat),
    /// Ask the model again with the user's comments.
    Refine { comments: String },
    /// Finish without copying anything.
    Exit,
}

/// How a finished session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The list was rendered; `copied` is false when the clipboard failed.
    Exported { format: ExportFormat, copied: bool },
    /// The user left without exporting.
    Exited,
}

/// Result of applying one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Back to presenting the (possibly replaced) file list.
    Continue,
    /// The session is over.
    Finished(Outcome),
}

/// One run of the analyze / refine / export workflow.
pub struct RelevanceSession<M, C> {
    config: SliceConfig,
    model: M,
    clipboard: C,
    root: PathBuf,
    request: String,
    tree: String,
    collected: CollectedContent,
    prompt: RelevancePrompt,
    prompt_tokens: usize,
    files: Vec<String>,
    refinements: usize,
    state: SessionState,
}

impl<M: RelevanceModel, C: Clipboard> RelevanceSession<M, C> {
    /// Collect the repository, build and budget-check the prompt, and ask the
    /// model for the first answer.
    pub async fn open(
        config: SliceConfig,
        root: impl Into<PathBuf>,
        request: impl Into<String>,
        tree_renderer: &dyn TreeRenderer,
        model: M,
        clipboard: C,
    ) -> Result<Self> {
        let root = root.into();
        let request = request.into();

        // Collecting
        info!("Analyzing repository structure in {}", root.display());
        let tree = tree_renderer.render(&root).await?;
        let collected = FileCollector::new(config.collector.clone()).collect(&root)?;

        // Prompting
        let prompt = prompt::build_initial(&request, &tree, &collected.concatenated());
        let prompt_tokens = estimate_tokens(prompt.as_str());
        info!("Estimated token count for prompt: {prompt_tokens}");
        if prompt_tokens >= config.max_prompt_tokens {
            return Err(SliceError::TokenBudgetExceeded {
                estimated: prompt_tokens,
                limit: config.max_prompt_tokens,
            });
        }

        // AwaitingModel
        let mut session = Self {
            config,
            model,
            clipboard,
            root,
            request,
            tree,
            collected,
            prompt,
            prompt_tokens,
            files: Vec::new(),
            refinements: 0,
            state: SessionState::Presenting,
        };
        session.files = session.ask(session.prompt.as_str()).await?;

        Ok(session)
    }

    /// The current relevant file list.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The analysis prompt built when the session opened.
    pub fn prompt(&self) -> &RelevancePrompt {
        &self.prompt
    }

    /// Estimated token count of the analysis prompt.
    pub fn prompt_tokens(&self) -> usize {
        self.prompt_tokens
    }

    /// Number of refinement rounds applied so far.
    pub fn refinements(&self) -> usize {
        self.refinements
    }

    /// The request the session was opened with.
    pub fn request(&self) -> &str {
        &self.request
    }

    /// Rendered directory tree.
    pub fn tree(&self) -> &str {
        &self.tree
    }

    /// What the walk collected.
    pub fn collected(&self) -> &CollectedContent {
        &self.collected
    }

    /// Apply one menu action. This is the only transition out of
    /// [`SessionState::Presenting`].
    pub async fn apply(&mut self, action: MenuAction) -> Result<Transition> {
        if self.state == SessionState::Done {
            return Err(SliceError::SessionFinished);
        }

        match action {
            MenuAction::Export(format) => {
                let text = self.render(format)?;
                let copied = match self.clipboard.write(&text).await {
                    Ok(()) => {
                        info!("Relevant files ({format}) copied to clipboard");
                        true
                    }
                    Err(err) => {
                        warn!("Failed to copy to clipboard: {err}");
                        false
                    }
                };
                self.state = SessionState::Done;
                Ok(Transition::Finished(Outcome::Exported { format, copied }))
            }
            MenuAction::Refine { comments } => {
                info!("Refining relevant files based on user comments");
                let refinement = prompt::build_refinement(&self.prompt, &self.files, &comments);
                let answer = self.ask(refinement.as_str()).await;
                match answer {
                    Ok(files) => {
                        self.files = files;
                        self.refinements += 1;
                        Ok(Transition::Continue)
                    }
                    Err(err) => {
                        self.state = SessionState::Done;
                        Err(err)
                    }
                }
            }
            MenuAction::Exit => {
                self.state = SessionState::Done;
                Ok(Transition::Finished(Outcome::Exited))
            }
        }
    }

    /// Render the current list in `format` without touching the clipboard.
    pub fn render(&self, format: ExportFormat) -> Result<String> {
        Ok(match format {
            ExportFormat::Content(mode) => ContentExport {
                root: &self.root,
                request: &self.request,
                tree: &self.tree,
                mode,
                collector: &self.config.collector,
            }
            .render(&self.files),
            ExportFormat::Json => export::to_json(&self.files)?,
            ExportFormat::AtFile => export::to_at_file(&self.files),
            ExportFormat::Newline => export::to_newline(&self.files),
        })
    }

    /// Root the file paths are relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn ask(&self, prompt: &str) -> Result<Vec<String>> {
        info!(
            "Asking {} ({}) for relevant files",
            self.model.name(),
            self.model.model()
        );
        let answer = self.model.ask(prompt).await?;
        let validated = validate_paths(
            &answer.relevant_files,
            self.collected.known_paths(),
            &self.root.to_string_lossy(),
        );
        if !validated.rejected.is_empty() {
            warn!(
                "Dropped {} paths that do not exist in the repository",
                validated.rejected.len()
            );
        }
        Ok(validated.accepted)
    }
}
