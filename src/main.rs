use bbsync::commands::status::status_command;
use bbsync::commands::sync::sync_command;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bbsync")]
#[command(about = "Synchronize the BBTools release version with the website and publish it", long_about = None)]
struct Cli {
    /// Config file (defaults to bbsync.toml when present)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync the website version with the release and push (the default)
    Sync {
        /// Answer yes to every confirmation gate
        #[arg(long)]
        yes: bool,

        /// Commit message for pre-existing changes when running with --yes
        #[arg(long, value_name = "MSG")]
        message: Option<String>,
    },

    /// Show versions and working-tree state without changing anything
    Status,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Sync { yes, message }) => {
            sync_command(cli.config.as_deref(), yes, message)
        }
        Some(Commands::Status) => status_command(cli.config.as_deref()),
        // Bare `bbsync` runs the interactive sync, like the original script
        None => sync_command(cli.config.as_deref(), false, None),
    }
}
