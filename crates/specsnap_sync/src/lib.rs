//! # specsnap_sync
//!
//! Discovery of API sets in an Azure REST API specification tree and copying
//! of the files each active version needs into a clean snapshot.
//!
//! For every provider folder, each API surface (`resource-manager`,
//! `data-plane`) is resolved through its `readme.md` to one version; that
//! version's input files plus their conventional companions (`common`,
//! `entityTypes`, `definitions`, `common.json`) are copied, and an
//! `api-set.json` manifest is written next to them.
//!
//! ## Example
//!
//! ```rust,no_run
//! use specsnap_sync::{SyncConfig, SyncRun};
//!
//! let config = SyncConfig::default()
//!     .with_source_root("./specs/specification")
//!     .with_target_root("./swagger-specs");
//!
//! let report = SyncRun::new(config).execute().unwrap();
//! println!("{} api sets copied", report.api_sets.len());
//! ```

pub mod apiset;
pub mod config;
pub mod copier;
pub mod discover;
pub mod error;
pub mod expand;
pub mod fetch;
pub mod run;

use std::path::Path;

use specsnap_readme::OverrideTable;

pub use apiset::{ApiSet, MANIFEST_FILE};
pub use config::{SyncConfig, CONFIG_FILE};
pub use copier::{copy_dir, copy_file_ensure_paths, CopyStats, SnapshotCopier};
pub use discover::{ApiSetDiscoverer, Discovery};
pub use error::{SyncError, SyncResult};
pub use expand::{expand, normalize_relative, CopySet};
pub use fetch::{GitSource, SpecSource};
pub use run::{SyncReport, SyncRun};

/// Discover API sets with the default surfaces and the given overrides.
pub fn discover(source_root: &Path, overrides: &OverrideTable) -> SyncResult<Vec<ApiSet>> {
    Ok(ApiSetDiscoverer::new(overrides.clone())
        .discover(source_root)?
        .api_sets)
}

/// Expand an API set and copy it from `source_root` to `target_root`, writing its manifest.
pub fn expand_and_copy(api_set: &ApiSet, source_root: &Path, target_root: &Path) -> SyncResult<CopyStats> {
    SnapshotCopier::new(source_root, target_root).expand_and_copy(api_set)
}
