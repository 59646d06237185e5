//! Fetch command - Clone the specification repository.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use specsnap_sync::{GitSource, SpecSource};

use super::load_config;

#[derive(Args)]
pub struct FetchArgs {
    /// Repository URL (defaults to the configured repository)
    #[arg(short, long)]
    repo: Option<String>,

    /// Clone destination (defaults to the configured clone folder)
    #[arg(short, long)]
    dest: Option<PathBuf>,

    /// History depth to fetch
    #[arg(long, default_value_t = 1)]
    depth: u32,
}

pub fn execute(args: FetchArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let repo = args.repo.unwrap_or(config.repository);
    let dest = args.dest.unwrap_or(config.clone_dir);

    let source = GitSource::new(repo).depth(args.depth);
    source
        .materialize(&dest)
        .with_context(|| format!("Failed to fetch {}", source.url()))?;

    println!("✅ Cloned {} into {}", source.url(), dest.display());
    Ok(())
}
