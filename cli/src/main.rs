use std::process::ExitCode;

use clap::Parser;
use repo_slice_cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    repo_slice_cli::init_tracing();

    match repo_slice_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error analyzing repository: {err:#}");
            ExitCode::FAILURE
        }
    }
}
