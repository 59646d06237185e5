//! Readme file reading utilities.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::block::resolve_block;
use crate::error::{ReadmeError, ReadmeResult};
use crate::models::{DeclaredVersion, VersionTag};
use crate::overrides::OverrideTable;
use crate::scanner::scan_all_versions;
use crate::tag::{declared_tag, resolve_surface_tag};

/// Reader for readme descriptors on disk.
pub struct ReadmeReader;

impl ReadmeReader {
    /// Read a descriptor, returning `None` if the file does not exist.
    pub fn read(path: impl AsRef<Path>) -> ReadmeResult<Option<String>> {
        let path = path.as_ref();
        if !path.is_file() {
            debug!("No descriptor at {:?}", path);
            return Ok(None);
        }

        debug!("Reading descriptor from {:?}", path);
        fs::read_to_string(path)
            .map(Some)
            .map_err(|source| ReadmeError::Read {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Resolve the active version declared by a descriptor file.
    ///
    /// `None` when the file is missing, no tag resolves, or no block matches the tag.
    pub fn read_active_version(
        path: impl AsRef<Path>,
        provider_name: &str,
        base_folder: &str,
        overrides: &OverrideTable,
    ) -> ReadmeResult<Option<DeclaredVersion>> {
        let Some(contents) = Self::read(path)? else {
            return Ok(None);
        };
        Self::active_version(&contents, provider_name, base_folder, overrides)
    }

    /// Resolve the active version from descriptor text.
    pub fn active_version(
        contents: &str,
        provider_name: &str,
        base_folder: &str,
        overrides: &OverrideTable,
    ) -> ReadmeResult<Option<DeclaredVersion>> {
        let Some(tag) = resolve_surface_tag(provider_name, base_folder, contents, overrides) else {
            debug!("No tag found for {}", base_folder);
            return Ok(None);
        };
        resolve_block(contents, &tag)
    }

    /// Every declared version in a descriptor file, `None` if the file is missing.
    pub fn read_all_versions(path: impl AsRef<Path>) -> ReadmeResult<Option<Vec<DeclaredVersion>>> {
        Ok(Self::read(path)?.map(|contents| scan_all_versions(&contents)))
    }

    /// The tag declared by a descriptor file's metadata header, ignoring overrides.
    pub fn read_declared_tag(path: impl AsRef<Path>) -> ReadmeResult<Option<VersionTag>> {
        Ok(Self::read(path)?.and_then(|contents| declared_tag(&contents)))
    }
}
