//! API set discovery over a specification tree.
//!
//! The expected layout is
//!
//! ```text
//! specification/
//!   compute/                    <- provider folder
//!     resource-manager/         <- API surface
//!       readme.md               <- descriptor
//!       Microsoft.Compute/...
//!   search/
//!     data-plane/
//!       Microsoft.Azure.Search/ <- sub-API, used when the surface has no descriptor
//!         readme.md
//! ```

use std::path::{Path, PathBuf};

use specsnap_readme::{resolve_block, resolve_surface_tag, OverrideTable, ReadmeReader};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::apiset::ApiSet;
use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};

/// Outcome of a discovery pass.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Resolved API sets, ordered by provider then surface.
    pub api_sets: Vec<ApiSet>,
    /// Provider folders that produced no API set.
    pub skipped: Vec<String>,
}

/// Walks provider folders and resolves one API set per descriptor.
#[derive(Debug, Clone)]
pub struct ApiSetDiscoverer {
    surfaces: Vec<String>,
    descriptor: String,
    excluded: Vec<String>,
    overrides: OverrideTable,
}

impl ApiSetDiscoverer {
    /// A discoverer with the default surfaces and descriptor name.
    pub fn new(overrides: OverrideTable) -> Self {
        let config = SyncConfig::default();
        Self {
            surfaces: config.surfaces,
            descriptor: config.descriptor,
            excluded: config.shared_folders,
            overrides,
        }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self {
            surfaces: config.surfaces.clone(),
            descriptor: config.descriptor.clone(),
            excluded: config.shared_folders.clone(),
            overrides: config.override_table(),
        }
    }

    /// Discover every resolvable API set under `source_root`.
    pub fn discover(&self, source_root: &Path) -> SyncResult<Discovery> {
        if !source_root.is_dir() {
            return Err(SyncError::SourceNotFound(source_root.to_path_buf()));
        }

        if !self.overrides.is_empty() {
            debug!("{} tag overrides in effect", self.overrides.len());
        }

        let mut discovery = Discovery::default();

        for provider_dir in child_dirs(source_root)? {
            let provider_name = dir_name(&provider_dir);
            if self.excluded.contains(&provider_name) {
                debug!("Skipping shared folder {}", provider_name);
                continue;
            }

            let api_sets = self.discover_provider(&provider_name, &provider_dir)?;
            if api_sets.is_empty() {
                info!("No api version found, ignoring: {}", provider_dir.display());
                discovery.skipped.push(provider_name);
                continue;
            }
            discovery.api_sets.extend(api_sets);
        }

        info!(
            "Discovered {} api sets, skipped {} providers",
            discovery.api_sets.len(),
            discovery.skipped.len()
        );
        Ok(discovery)
    }

    fn discover_provider(&self, provider_name: &str, provider_dir: &Path) -> SyncResult<Vec<ApiSet>> {
        let mut api_sets = Vec::new();

        for surface in &self.surfaces {
            let surface_dir = provider_dir.join(surface);
            if !surface_dir.is_dir() {
                continue;
            }
            let base_folder = format!("{}/{}", provider_name, surface);

            let descriptor = surface_dir.join(&self.descriptor);
            if descriptor.is_file() {
                api_sets.extend(self.resolve(provider_name, &base_folder, &descriptor)?);
                continue;
            }

            debug!("No descriptor in {}, checking sub-apis", base_folder);
            for sub_dir in child_dirs(&surface_dir)? {
                let sub_base = format!("{}/{}", base_folder, dir_name(&sub_dir));
                let descriptor = sub_dir.join(&self.descriptor);
                if !descriptor.is_file() {
                    debug!("No descriptor in {}", sub_base);
                    continue;
                }
                api_sets.extend(self.resolve(provider_name, &sub_base, &descriptor)?);
            }
        }

        Ok(api_sets)
    }

    /// Resolve one descriptor into an API set.
    fn resolve(
        &self,
        provider_name: &str,
        base_folder: &str,
        descriptor: &Path,
    ) -> SyncResult<Option<ApiSet>> {
        let descriptor_error = |source| SyncError::Descriptor {
            path: descriptor.to_path_buf(),
            source,
        };

        let Some(contents) = ReadmeReader::read(descriptor).map_err(descriptor_error)? else {
            return Ok(None);
        };

        let Some(tag) = resolve_surface_tag(provider_name, base_folder, &contents, &self.overrides)
        else {
            warn!("No tag found in {}", descriptor.display());
            return Ok(None);
        };

        let Some(version) = resolve_block(&contents, &tag).map_err(descriptor_error)? else {
            warn!(
                "No yaml block for tag {} in {}",
                tag,
                descriptor.display()
            );
            return Ok(None);
        };

        info!("{}, using api-version {}", base_folder, version.tag());
        Ok(Some(ApiSet::new(provider_name, base_folder, version)))
    }
}

/// Immediate subdirectories of `dir`, sorted by name.
fn child_dirs(dir: &Path) -> SyncResult<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|source| SyncError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn readme(tag: &str, file: &str) -> String {
        format!(
            "``` yaml\nopenapi-type: arm\ntag: {tag}\n```\n\n```yaml $(tag) == '{tag}'\ninput-file:\n- {file}\n```\n"
        )
    }

    #[test]
    fn test_missing_source_root() {
        let temp = tempdir().unwrap();
        let result = ApiSetDiscoverer::new(OverrideTable::new()).discover(&temp.path().join("nope"));
        assert!(matches!(result, Err(SyncError::SourceNotFound(_))));
    }

    #[test]
    fn test_providers_are_sorted_and_skipped() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write(root, "web/resource-manager/readme.md", &readme("package-2019-08", "W/w.json"));
        write(root, "compute/resource-manager/readme.md", &readme("package-2020-06", "C/c.json"));
        write(root, "empty/resource-manager/notes.md", "nothing");
        write(root, "common-types/resource-management/v1/types.json", "{}");

        let discovery = ApiSetDiscoverer::new(OverrideTable::new()).discover(root).unwrap();
        let bases: Vec<&str> = discovery.api_sets.iter().map(|s| s.base_folder.as_str()).collect();
        assert_eq!(bases, ["compute/resource-manager", "web/resource-manager"]);
        assert_eq!(discovery.skipped, ["empty"]);
    }

    #[test]
    fn test_sub_apis_used_when_surface_has_no_descriptor() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write(root, "search/resource-manager/readme.md", &readme("package-2015-08", "M/s.json"));
        write(root, "search/data-plane/Microsoft.Azure.Search/readme.md", &readme("package-2019-05", "p/q.json"));
        write(root, "search/data-plane/Microsoft.Azure.Search.Service/readme.md", &readme("package-2019-05", "r.json"));

        let discovery = ApiSetDiscoverer::new(OverrideTable::new()).discover(root).unwrap();
        let bases: Vec<&str> = discovery.api_sets.iter().map(|s| s.base_folder.as_str()).collect();
        assert_eq!(
            bases,
            [
                "search/resource-manager",
                "search/data-plane/Microsoft.Azure.Search",
                "search/data-plane/Microsoft.Azure.Search.Service",
            ]
        );
        assert!(discovery.api_sets.iter().all(|s| s.provider_name == "search"));
    }

    #[test]
    fn test_override_applies() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        let contents = format!(
            "{}\n```yaml $(tag) == 'package-2017-03'\ninput-file:\n- old.json\n```\n",
            readme("package-2019-05", "new.json")
        );
        write(root, "registry/resource-manager/readme.md", &contents);

        let overrides = OverrideTable::new().with_entry("registry", "package-2017-03");
        let discovery = ApiSetDiscoverer::new(overrides).discover(root).unwrap();
        assert_eq!(discovery.api_sets[0].version.input_files(), ["old.json"]);
    }

    #[test]
    fn test_unlistable_folder_is_an_error() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("gone");
        let err = child_dirs(&missing).unwrap_err();
        match err {
            SyncError::Walk { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
        assert!(child_dirs(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_unterminated_block_is_fatal() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write(
            root,
            "broken/resource-manager/readme.md",
            "openapi-type: arm\ntag: package-1\n\n```yaml $(tag) == 'package-1'\ninput-file:\n- a.json\n",
        );

        let result = ApiSetDiscoverer::new(OverrideTable::new()).discover(root);
        assert!(matches!(result, Err(SyncError::Descriptor { .. })));
    }
}
