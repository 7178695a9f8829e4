//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// geyser-sync - deploy the latest Geyser build to a Spigot server over FTP
///
/// Checks Jenkins for a newer successful build, uploads it to the server's
/// plugin directory, removes the previous build and records the new one.
#[derive(Parser, Debug)]
#[command(name = "geyser-sync")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Connection and state file
    #[arg(short, long, global = true, env = "GEYSER_SYNC_STATE", default_value = "host.json")]
    pub state: PathBuf,

    /// Settings file path
    #[arg(short, long, global = true, env = "GEYSER_SYNC_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy the latest build if it is new (run this from cron)
    Run(RunArgs),

    /// Report whether a new build is waiting, without touching anything
    Check,

    /// Show the stored state and cache usage
    Status,

    /// Manage the local download cache
    Cache(CacheArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Download directory (overrides [cache].dir)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Remote plugin directory (overrides [remote].dir)
    #[arg(long)]
    pub remote_dir: Option<String>,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// List cached artifacts and total size
    Info,

    /// Remove every cached artifact
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
