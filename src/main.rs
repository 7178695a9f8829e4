//! geyser-sync - Geyser plugin deployment for Spigot servers
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use geyser_sync::cli::{Cli, Commands};
use geyser_sync::config::{SettingsManager, StateStore};
use geyser_sync::error::SyncResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> SyncResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("geyser_sync=warn"),
        1 => EnvFilter::new("geyser_sync=info"),
        _ => EnvFilter::new("geyser_sync=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let settings_manager = match cli.config {
        Some(ref path) => SettingsManager::with_path(path.clone()),
        None => SettingsManager::new(),
    };
    debug!("Settings file: {}", settings_manager.path().display());
    let settings = settings_manager.load()?;

    let state = StateStore::new(cli.state.clone());

    match cli.command {
        Commands::Run(args) => geyser_sync::cli::commands::run(args, &settings, &state),
        Commands::Check => geyser_sync::cli::commands::check(&settings, &state),
        Commands::Status => geyser_sync::cli::commands::status(&settings, &state),
        Commands::Cache(args) => geyser_sync::cli::commands::cache(args, &settings),
    }
}
