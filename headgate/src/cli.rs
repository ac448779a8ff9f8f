// headgate/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "headgate")]
#[command(about = "Declarative pipeline setup for the Headgate Cloud control plane", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Provisions the source, destination, and connection
    Apply {
        /// Project directory (holds configs/)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Control-plane base URL
        #[arg(
            long,
            env = "HEADGATE_API_URL",
            default_value = "https://api.headgate.cloud/v1"
        )]
        api_url: String,

        /// Bearer token for the control-plane API
        #[arg(long, env = "HEADGATE_API_TOKEN", hide_env_values = true)]
        api_token: String,

        /// Workspace the resources live in
        #[arg(long, env = "HEADGATE_WORKSPACE_ID")]
        workspace_id: String,

        /// Skip the connector checks after resolving source and destination
        #[arg(long, default_value = "false")]
        skip_checks: bool,
    },

    /// 🔭 Shows what apply would do (create vs reuse), without mutating
    Plan {
        /// Project directory (holds configs/)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Control-plane base URL
        #[arg(
            long,
            env = "HEADGATE_API_URL",
            default_value = "https://api.headgate.cloud/v1"
        )]
        api_url: String,

        /// Bearer token for the control-plane API
        #[arg(long, env = "HEADGATE_API_TOKEN", hide_env_values = true)]
        api_token: String,

        /// Workspace the resources live in
        #[arg(long, env = "HEADGATE_WORKSPACE_ID")]
        workspace_id: String,
    },

    /// ✅ Validates the pipeline documents offline (no API calls)
    Validate {
        /// Project directory (holds configs/)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}
