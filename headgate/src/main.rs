// headgate/src/main.rs

mod cli;
mod commands;

use clap::Parser;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug headgate apply ... pour voir les détails
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Apply {
            project_dir,
            api_url,
            api_token,
            workspace_id,
            skip_checks,
        } => commands::apply::execute(project_dir, api_url, api_token, workspace_id, skip_checks).await,

        Commands::Plan {
            project_dir,
            api_url,
            api_token,
            workspace_id,
        } => commands::plan::execute(project_dir, api_url, api_token, workspace_id).await,

        Commands::Validate { project_dir } => commands::validate::execute(project_dir),
    }
}
