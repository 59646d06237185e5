//! Copying API sets into the snapshot tree.

use std::fs;
use std::path::{Path, PathBuf};

use fs_extra::dir::CopyOptions;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::apiset::ApiSet;
use crate::error::{SyncError, SyncResult};
use crate::expand::{expand, CopySet};

/// Counts for one copy operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Files written, including files inside copied folders.
    pub files: usize,
    /// Folders copied recursively.
    pub dirs: usize,
}

impl CopyStats {
    pub fn add(&mut self, other: CopyStats) {
        self.files += other.files;
        self.dirs += other.dirs;
    }
}

/// Copies API sets and shared folders from a source tree to a target tree.
#[derive(Debug, Clone)]
pub struct SnapshotCopier {
    source_root: PathBuf,
    target_root: PathBuf,
}

impl SnapshotCopier {
    pub fn new(source_root: impl Into<PathBuf>, target_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            target_root: target_root.into(),
        }
    }

    /// Expand an API set, copy its files and write its manifest.
    pub fn expand_and_copy(&self, api_set: &ApiSet) -> SyncResult<CopyStats> {
        let copy_set = expand(api_set, &self.source_root)?;
        let stats = self.copy(api_set, &copy_set)?;
        self.write_manifest(api_set)?;
        Ok(stats)
    }

    /// Copy a precomputed copy-set.
    pub fn copy(&self, api_set: &ApiSet, copy_set: &CopySet) -> SyncResult<CopyStats> {
        let source_base = api_set.base_dir(&self.source_root);
        let target_base = api_set.base_dir(&self.target_root);
        let mut stats = CopyStats::default();

        for relative in &copy_set.files {
            copy_file_ensure_paths(&source_base.join(relative), &target_base.join(relative))?;
            stats.files += 1;
        }

        for relative in &copy_set.dirs {
            stats.files += copy_dir(&source_base.join(relative), &target_base.join(relative))?;
            stats.dirs += 1;
        }

        debug!(
            "Copied {} files and {} folders for {}",
            stats.files, stats.dirs, api_set.base_folder
        );
        Ok(stats)
    }

    /// Write `api-set.json` into the API set's target base folder.
    pub fn write_manifest(&self, api_set: &ApiSet) -> SyncResult<PathBuf> {
        let path = api_set.manifest_path(&self.target_root);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut content = serde_json::to_string_pretty(&api_set.version)?;
        content.push('\n');
        fs::write(&path, content)?;

        debug!("Wrote manifest {:?}", path);
        Ok(path)
    }

    /// Copy a top-level shared folder (such as `common-types`) whole, if it exists.
    pub fn copy_shared_folder(&self, name: &str) -> SyncResult<Option<CopyStats>> {
        let source = self.source_root.join(name);
        if !source.is_dir() {
            debug!("Shared folder {} not present", name);
            return Ok(None);
        }

        let files = copy_dir(&source, &self.target_root.join(name))?;
        info!("Copied shared folder {} ({} files)", name, files);
        Ok(Some(CopyStats { files, dirs: 1 }))
    }

    /// Delete the target tree if present and recreate it empty.
    pub fn reset_target(&self) -> SyncResult<()> {
        self.ensure_target_outside_source()?;
        if self.target_root.exists() {
            info!("Deleting {}...", self.target_root.display());
            fs::remove_dir_all(&self.target_root)?;
        }
        fs::create_dir_all(&self.target_root)?;
        Ok(())
    }

    /// Fail when the target is the source root or one of its ancestors.
    ///
    /// Deleting or writing such a target would destroy the source tree.
    pub fn ensure_target_outside_source(&self) -> SyncResult<()> {
        if !self.target_root.exists() || !self.source_root.exists() {
            return Ok(());
        }
        let source = fs::canonicalize(&self.source_root)?;
        let target = fs::canonicalize(&self.target_root)?;
        if source.starts_with(&target) {
            return Err(SyncError::InvalidConfig {
                path: self.target_root.clone(),
                message: format!(
                    "target folder contains the source folder {}",
                    self.source_root.display()
                ),
            });
        }
        Ok(())
    }
}

/// Copy one file, creating the destination's parent folders.
pub fn copy_file_ensure_paths(source: &Path, target: &Path) -> SyncResult<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, target).map_err(|e| SyncError::CopyFailed {
        from: source.to_path_buf(),
        to: target.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(())
}

/// Copy a folder recursively into `target`, returning the number of files copied.
pub fn copy_dir(source: &Path, target: &Path) -> SyncResult<usize> {
    fs::create_dir_all(target)?;

    let options = CopyOptions::new().overwrite(true).content_only(true);
    fs_extra::dir::copy(source, target, &options).map_err(|e| SyncError::CopyFailed {
        from: source.to_path_buf(),
        to: target.to_path_buf(),
        message: e.to_string(),
    })?;

    let files = WalkDir::new(source)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .count();
    Ok(files)
}
