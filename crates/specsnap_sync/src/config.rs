//! Sync configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use specsnap_readme::OverrideTable;
use tracing::debug;

use crate::error::{SyncError, SyncResult};

/// Default config file looked up in the working directory.
pub const CONFIG_FILE: &str = "specsnap.yaml";

/// Settings for one sync run.
///
/// Every field has a default, so a partial YAML file is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SyncConfig {
    /// Root of the materialized specification tree (one folder per provider).
    pub source_root: PathBuf,
    /// Root of the snapshot to produce.
    pub target_root: PathBuf,
    /// API surface folders looked up under each provider, in order.
    pub surfaces: Vec<String>,
    /// Descriptor file name inside a surface folder.
    pub descriptor: String,
    /// Folders copied whole after the API sets and excluded from discovery.
    pub shared_folders: Vec<String>,
    /// Repository cloned by `fetch`.
    pub repository: String,
    /// Where `fetch` clones the repository.
    pub clone_dir: PathBuf,
    /// Forced tags, layered over the builtin table when `builtin_overrides` is set.
    pub overrides: OverrideTable,
    /// Whether [`OverrideTable::builtin`] applies.
    pub builtin_overrides: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("./swagger-temp/azure-rest-api-specs/specification"),
            target_root: PathBuf::from("./swagger-specs"),
            surfaces: vec!["resource-manager".to_string(), "data-plane".to_string()],
            descriptor: "readme.md".to_string(),
            shared_folders: vec!["common-types".to_string()],
            repository: "git@github.com:azure/azure-rest-api-specs".to_string(),
            clone_dir: PathBuf::from("./swagger-temp/azure-rest-api-specs"),
            overrides: OverrideTable::new(),
            builtin_overrides: true,
        }
    }
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config file.
    pub fn load(path: impl AsRef<Path>) -> SyncResult<Self> {
        let path = path.as_ref();
        debug!("Loading config from {:?}", path);

        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| SyncError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load `path` if given, else [`CONFIG_FILE`] from `dir` if it exists, else defaults.
    pub fn discover(path: Option<&Path>, dir: impl AsRef<Path>) -> SyncResult<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let default_path = dir.as_ref().join(CONFIG_FILE);
        if default_path.is_file() {
            return Self::load(default_path);
        }
        Ok(Self::default())
    }

    pub fn with_source_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_root = path.into();
        self
    }

    pub fn with_target_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.target_root = path.into();
        self
    }

    pub fn with_overrides(mut self, overrides: OverrideTable) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn without_builtin_overrides(mut self) -> Self {
        self.builtin_overrides = false;
        self
    }

    /// The override table in effect for this run.
    pub fn override_table(&self) -> OverrideTable {
        if self.builtin_overrides {
            OverrideTable::builtin().merged(&self.overrides)
        } else {
            self.overrides.clone()
        }
    }
}
