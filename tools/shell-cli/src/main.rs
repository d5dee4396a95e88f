//! Shell worker CLI - Warm and inspect offline shell caches.
//!
//! Commands:
//! - `shellsw warm` - Precache the configured manifests from a built site
//! - `shellsw ls` - List cache partitions and their entries
//! - `shellsw drill` - Replay requests against the cache with the network off

mod adapter;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{DrillArgs, LsArgs, WarmArgs};

/// Warm and inspect offline shell caches.
#[derive(Parser)]
#[command(name = "shellsw")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Precache the app shell and static assets from a built site directory
    Warm(WarmArgs),

    /// List cache partitions and their entries
    Ls(LsArgs),

    /// Replay request paths against the warmed cache with the network off
    Drill(DrillArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let output = output::Output::new(cli.verbose, cli.json);

    match cli.command {
        Commands::Warm(args) => commands::warm::run(args, &output).await,
        Commands::Ls(args) => commands::ls::run(args, &output).await,
        Commands::Drill(args) => commands::drill::run(args, &output).await,
    }
}
