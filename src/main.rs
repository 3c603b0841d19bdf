// src/main.rs — cvscan entry point

use clap::Parser;

use cvscan::cli::{Cli, Commands};
use cvscan::infra::config::Config;
use cvscan::infra::{logger, paths};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    let command = cli.command.unwrap_or(Commands::Ui);

    // The TUI owns the terminal, so its logs go to a file or nowhere (respects RUST_LOG)
    match command {
        Commands::Ui if config.ui.log_to_file => {
            logger::init_file_logging(&paths::log_file_path(), &config.ui.log_level);
        }
        Commands::Ui => {}
        _ => logger::init_logging("warn"),
    }

    tracing::debug!(base_url = %config.api.base_url, "Config loaded");
    cvscan::cli::commands::run_command(command, &config, cli.user_id).await
}
