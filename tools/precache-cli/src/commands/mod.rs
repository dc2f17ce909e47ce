//! CLI command implementations.

pub mod check;
pub mod diff;
pub mod manifest;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use precache_core::{AssetBundle, PartitionConfig, WorkerConfig, WorkerScope};

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Worker config file (TOML or JSON)
    pub config: PathBuf,
}

/// Arguments for the manifest command.
#[derive(Args)]
pub struct ManifestArgs {
    /// Worker config file (TOML or JSON)
    pub config: PathBuf,

    /// Write the record to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the diff command.
#[derive(Args)]
pub struct DiffArgs {
    /// Worker config file (TOML or JSON)
    pub config: PathBuf,

    /// Manifest record from the currently deployed version
    #[arg(short, long)]
    pub previous: Option<PathBuf>,
}

/// Load and validate a worker config.
pub(crate) fn load_config(path: &Path) -> Result<(WorkerScope, PartitionConfig, AssetBundle)> {
    tracing::debug!(path = %path.display(), "Loading worker config");
    let config = WorkerConfig::load(path)?;
    config
        .into_parts()
        .with_context(|| format!("Invalid worker config: {}", path.display()))
}
