//! API set records.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use specsnap_readme::DeclaredVersion;

/// Manifest file written into every API set's base folder in the snapshot.
pub const MANIFEST_FILE: &str = "api-set.json";

/// One resolvable provider surface and the version chosen for it.
///
/// `base_folder` is relative to the source root, forward-slash separated
/// (`compute/resource-manager`, `search/data-plane/Microsoft.Azure.Search`).
/// The version's input files are relative to `base_folder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSet {
    pub provider_name: String,
    pub base_folder: String,
    pub version: DeclaredVersion,
}

impl ApiSet {
    pub fn new(
        provider_name: impl Into<String>,
        base_folder: impl Into<String>,
        version: DeclaredVersion,
    ) -> Self {
        Self {
            provider_name: provider_name.into(),
            base_folder: base_folder.into(),
            version,
        }
    }

    /// The base folder as a relative path.
    pub fn base_path(&self) -> PathBuf {
        self.base_folder.split('/').collect()
    }

    /// The base folder under `root`.
    pub fn base_dir(&self, root: &Path) -> PathBuf {
        root.join(self.base_path())
    }

    /// Location of the manifest under a target root.
    pub fn manifest_path(&self, target_root: &Path) -> PathBuf {
        self.base_dir(target_root).join(MANIFEST_FILE)
    }
}
