//! Sync command - Build the snapshot tree.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use specsnap_sync::SyncRun;

use super::load_config;

#[derive(Args, Default)]
pub struct SyncArgs {
    /// Specification folder to read (one folder per provider)
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Folder to write the snapshot to
    #[arg(short, long)]
    target: Option<PathBuf>,

    /// Keep existing target contents instead of deleting them first
    #[arg(long)]
    keep_target: bool,

    /// Ignore the compiled-in tag overrides
    #[arg(long)]
    no_builtin_overrides: bool,
}

pub fn execute(args: SyncArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(source) = args.source {
        config = config.with_source_root(source);
    }
    if let Some(target) = args.target {
        config = config.with_target_root(target);
    }
    if args.no_builtin_overrides {
        config = config.without_builtin_overrides();
    }

    info!(
        "Syncing {} -> {}",
        config.source_root.display(),
        config.target_root.display()
    );

    let mut run = SyncRun::new(config);
    if args.keep_target {
        run = run.keep_target();
    }
    let report = run.execute().context("Sync failed")?;

    println!("✅ Snapshot written to {}", run.config().target_root.display());
    println!();
    println!("  📦 API sets:         {}", report.api_sets.len());
    println!("  📄 Files copied:     {}", report.files_copied);
    println!("  📁 Folders copied:   {}", report.dirs_copied);
    if !report.shared_folders.is_empty() {
        println!("  🔗 Shared folders:   {}", report.shared_folders.join(", "));
    }
    if !report.skipped_providers.is_empty() {
        println!("  ⚠️  Skipped providers: {}", report.skipped_providers.len());
    }

    Ok(())
}
