//! A complete sync run: discover, copy, write manifests.

use tracing::info;

use crate::apiset::ApiSet;
use crate::config::SyncConfig;
use crate::copier::{CopyStats, SnapshotCopier};
use crate::discover::ApiSetDiscoverer;
use crate::error::{SyncError, SyncResult};

/// Summary of a finished sync run.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub api_sets: Vec<ApiSet>,
    pub skipped_providers: Vec<String>,
    pub files_copied: usize,
    pub dirs_copied: usize,
    pub shared_folders: Vec<String>,
}

/// Runs one snapshot of the source tree into the target tree.
pub struct SyncRun {
    config: SyncConfig,
    reset_target: bool,
}

impl SyncRun {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            reset_target: true,
        }
    }

    /// Keep existing target contents instead of deleting the target first.
    pub fn keep_target(mut self) -> Self {
        self.reset_target = false;
        self
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn execute(&self) -> SyncResult<SyncReport> {
        let source_root = &self.config.source_root;
        if !source_root.is_dir() {
            return Err(SyncError::SourceNotFound(source_root.clone()));
        }

        let copier = SnapshotCopier::new(source_root, &self.config.target_root);
        if self.reset_target {
            copier.reset_target()?;
        } else {
            copier.ensure_target_outside_source()?;
        }

        let discovery = ApiSetDiscoverer::from_config(&self.config).discover(source_root)?;

        let mut stats = CopyStats::default();
        for api_set in &discovery.api_sets {
            stats.add(copier.expand_and_copy(api_set)?);
        }

        let mut shared_folders = Vec::new();
        for name in &self.config.shared_folders {
            if let Some(shared) = copier.copy_shared_folder(name)? {
                stats.add(shared);
                shared_folders.push(name.clone());
            }
        }

        info!(
            "Copied {} api sets ({} files, {} folders) to {}",
            discovery.api_sets.len(),
            stats.files,
            stats.dirs,
            self.config.target_root.display()
        );

        Ok(SyncReport {
            api_sets: discovery.api_sets,
            skipped_providers: discovery.skipped,
            files_copied: stats.files,
            dirs_copied: stats.dirs,
            shared_folders,
        })
    }
}
