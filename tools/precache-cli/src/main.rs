//! Precache CLI - Inspect precache worker bundles.
//!
//! Commands:
//! - `precache check` - Validate a worker config
//! - `precache manifest` - Print the manifest record activation persists
//! - `precache diff` - Preview what an upgrade evicts and retains

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, DiffArgs, ManifestArgs};

/// Precache CLI - Inspect precache worker bundles
#[derive(Parser)]
#[command(name = "precache")]
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
    /// Validate a worker config
    Check(CheckArgs),

    /// Print the manifest record for a worker config
    Manifest(ManifestArgs),

    /// Compare a worker config against a previously applied manifest
    Diff(DiffArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);

    let result = match cli.command {
        Commands::Check(args) => commands::check::run(args, &output).await,
        Commands::Manifest(args) => commands::manifest::run(args, &output).await,
        Commands::Diff(args) => commands::diff::run(args, &output).await,
    };

    if let Err(e) = result {
        output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
