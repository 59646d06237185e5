//! CLI command definitions.
//!
//! Running `specsnap` with no subcommand performs `sync` with the configured
//! (or compiled-in) source and target folders.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use specsnap_sync::SyncConfig;

pub mod fetch;
pub mod sync;
pub mod versions;

/// specsnap - minimal snapshots of an API specification repository
#[derive(Parser)]
#[command(name = "specsnap")]
#[command(version, about = "specsnap - minimal snapshots of an API specification repository")]
#[command(long_about = r#"
specsnap extracts, from a tree of versioned API specification folders, the
files that make up each folder's current version tag and republishes only
those files into a clean output tree.

WORKFLOWS:
  fetch     → Shallow-clone the specification repository
  sync      → Resolve each provider's active version and copy its files (default)
  versions  → List the versions declared by one readme

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments or missing source tree
  3 - Readme descriptor could not be parsed
  4 - Copy failure
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Config file (defaults to ./specsnap.yaml when present)
    #[arg(short, long, global = true, env = "SPECSNAP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Copy the active version of every API set into the target folder
    Sync(sync::SyncArgs),

    /// Clone the specification repository
    Fetch(fetch::FetchArgs),

    /// List the versions declared by a readme
    Versions(versions::VersionsArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Sync(sync::SyncArgs::default())
    }
}

/// Load the config from `--config`, `./specsnap.yaml`, or defaults.
pub fn load_config(path: Option<&std::path::Path>) -> Result<SyncConfig> {
    let current_dir = std::env::current_dir()?;
    SyncConfig::discover(path, &current_dir).context("Failed to load config")
}
