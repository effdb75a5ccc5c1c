//! # repo-slice CLI
//!
//! Asks for a change request, lets a model pick the relevant files of a
//! repository, then loops over the refine / export menu until the session
//! finishes.

pub mod menu;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use repo_slice_core::{
    CommandClipboard, CommandTree, GeminiProvider, Outcome, RelevanceModel, RelevanceSession,
    SliceConfig, Transition,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "warn,repo_slice_cli=info,repo_slice_core=info,repo_slice_collector=info,repo_slice_model=info";

#[derive(Debug, Parser)]
#[command(name = "repo-slice")]
#[command(about = "Find the files in a repository that matter for a change request", long_about = None)]
pub struct Cli {
    /// Repository root to analyze
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Model alias from the config table (e.g. "2" or "2.5")
    #[arg(short, long)]
    pub model: Option<String>,

    /// Config file; defaults to <config dir>/repo-slice/config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Install the stderr log subscriber.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run one interactive session.
pub async fn run(cli: Cli) -> Result<()> {
    if let Err(err) = dotenvy::dotenv() {
        debug!("No .env file loaded: {err}");
    }

    let config = SliceConfig::load_or_default(cli.config.as_deref())?;
    let resolved = config.resolve_model(cli.model.as_deref())?;

    let model = GeminiProvider::new().with_model(resolved.name.clone());
    if !model.is_available() {
        warn!("{} is not set; the model call will fail", GeminiProvider::API_KEY_ENV);
    }
    let tree = CommandTree::from_command(&config.tree_command).unwrap_or_default();
    let clipboard = CommandClipboard::from_command(&config.clipboard_command).unwrap_or_default();

    let request = menu::prompt_request()?;

    println!(
        "Analyzing {} with {} ({})...",
        cli.root.display(),
        resolved.name,
        resolved.alias
    );
    let mut session =
        RelevanceSession::open(config, cli.root, request, &tree, model, clipboard).await?;
    println!(
        "Estimated token count for prompt: {}",
        session.prompt_tokens()
    );

    loop {
        print_files(session.files());

        let action = menu::choose_action()?;
        match session.apply(action).await? {
            Transition::Continue => {
                println!("Refinement {} applied.", session.refinements());
            }
            Transition::Finished(Outcome::Exported { format, copied: true }) => {
                println!(
                    "Copied {} files to the clipboard as {format}.",
                    session.files().len()
                );
                return Ok(());
            }
            Transition::Finished(Outcome::Exported {
                format,
                copied: false,
            }) => {
                println!("Could not copy to the clipboard; {format} export follows:\n");
                println!("{}", session.render(format)?);
                return Ok(());
            }
            Transition::Finished(Outcome::Exited) => {
                println!("Exiting without copying.");
                return Ok(());
            }
        }
    }
}

fn print_files(files: &[String]) {
    if files.is_empty() {
        println!("\nNo relevant files found.\n");
        return;
    }
    println!("\nRelevant files:");
    for file in files {
        println!("  {file}");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["repo-slice"]).unwrap();
        assert_eq!(cli.root, PathBuf::from("."));
        assert_eq!(cli.model, None);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_model_and_root() {
        let cli =
            Cli::try_parse_from(["repo-slice", "-m", "2.5", "--config", "rs.toml", "../app"])
                .unwrap();
        assert_eq!(cli.root, PathBuf::from("../app"));
        assert_eq!(cli.model.as_deref(), Some("2.5"));
        assert_eq!(cli.config, Some(PathBuf::from("rs.toml")));
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}
