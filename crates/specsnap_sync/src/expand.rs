//! Copy-set computation for an API set.
//!
//! Besides the declared input files, a version usually needs files it
//! references by relative path. Those live in a few conventional places:
//!
//! - `common/` directly under the base folder
//! - `<ResourceType>/common/` under each top-level resource type folder
//! - `entityTypes/` and `definitions/` next to each input file
//! - `common.json` next to each input file

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::apiset::ApiSet;
use crate::error::{SyncError, SyncResult};

const COMMON_DIR: &str = "common";
const SIBLING_DIRS: [&str; 2] = ["entityTypes", "definitions"];
const SIBLING_FILES: [&str; 1] = ["common.json"];

/// Files and folders to copy for one API set, relative to its base folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopySet {
    pub files: BTreeSet<PathBuf>,
    pub dirs: BTreeSet<PathBuf>,
}

impl CopySet {
    pub fn len(&self) -> usize {
        self.files.len() + self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty()
    }
}

/// Compute the copy-set for `api_set` against the source tree.
///
/// Every declared file must exist. Conventional folders and files are only
/// included when present.
pub fn expand(api_set: &ApiSet, source_root: &Path) -> SyncResult<CopySet> {
    let base_dir = api_set.base_dir(source_root);
    let mut copy_set = CopySet::default();
    let mut parents = BTreeSet::new();
    let mut resource_types = BTreeSet::new();

    for file in api_set.version.input_files() {
        let relative = normalize_relative(file);
        if !stays_inside(&relative) {
            return Err(SyncError::InvalidInputPath {
                api_set: api_set.base_folder.clone(),
                path: file.clone(),
            });
        }
        let source = base_dir.join(&relative);
        if !source.is_file() {
            return Err(SyncError::MissingInputFile {
                api_set: api_set.base_folder.clone(),
                path: source,
            });
        }

        if let Some(resource_type) = resource_type_of(&relative) {
            resource_types.insert(resource_type);
        }
        parents.insert(relative.parent().map(Path::to_path_buf).unwrap_or_default());
        copy_set.files.insert(relative);
    }

    let mut add_dir = |relative: PathBuf| {
        if base_dir.join(&relative).is_dir() {
            copy_set.dirs.insert(relative);
        }
    };

    add_dir(PathBuf::from(COMMON_DIR));
    for resource_type in &resource_types {
        add_dir(resource_type.join(COMMON_DIR));
    }
    for parent in &parents {
        for name in SIBLING_DIRS {
            add_dir(parent.join(name));
        }
    }

    for parent in &parents {
        for name in SIBLING_FILES {
            let relative = parent.join(name);
            if base_dir.join(&relative).is_file() {
                copy_set.files.insert(relative);
            }
        }
    }

    debug!(
        "{}: {} files, {} folders to copy",
        api_set.base_folder,
        copy_set.files.len(),
        copy_set.dirs.len()
    );
    Ok(copy_set)
}

/// Lexically normalize a declared path: drop `.` and fold `..` where possible.
pub fn normalize_relative(path: &str) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in Path::new(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    normalized.pop();
                } else {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// True for a normalized path that names something below its base folder.
fn stays_inside(relative: &Path) -> bool {
    relative.components().all(|c| matches!(c, Component::Normal(_)))
        && relative.components().next().is_some()
}

/// First path segment of a file nested at least one folder deep, e.g. `Microsoft.Compute`.
fn resource_type_of(relative: &Path) -> Option<PathBuf> {
    let mut components = relative.components();
    let first = components.next()?;
    components.next()?;
    match first {
        Component::Normal(name) => Some(PathBuf::from(name)),
        _ => None,
    }
}
