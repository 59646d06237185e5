//! Data models for declared API versions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag naming every API version in one descriptor (`$(tag) == 'all-api-versions'`).
pub const AGGREGATE_TAG: &str = "all-api-versions";

/// Tag suffixes that mark a version as preview only.
pub const PREVIEW_SUFFIXES: [&str; 2] = ["-preview", "-preview-only"];

/// Identifier of one declared version, e.g. `package-2019-05`.
///
/// Compared by exact text. Ordering is plain lexicographic order on the text,
/// which matches release order only for date-shaped tags.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionTag(String);

impl VersionTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the aggregate sentinel rather than a real version.
    pub fn is_aggregate(&self) -> bool {
        self.0 == AGGREGATE_TAG
    }

    /// Whether the tag carries a preview suffix.
    pub fn is_preview_only(&self) -> bool {
        PREVIEW_SUFFIXES.iter().any(|suffix| self.0.ends_with(suffix))
    }

    /// Whether the tag may be picked by automatic version selection.
    pub fn is_selectable(&self) -> bool {
        !self.is_aggregate() && !self.is_preview_only()
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VersionTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VersionTag {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

impl From<String> for VersionTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl PartialEq<str> for VersionTag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for VersionTag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One version block parsed from a descriptor: its tag and the input files it declares.
///
/// Paths are relative to the descriptor's folder, use forward slashes and keep
/// declaration order (duplicates included). Serializes as
/// `{"name": <tag>, "input_files": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredVersion {
    #[serde(rename = "name")]
    tag: VersionTag,
    input_files: Vec<String>,
}

impl DeclaredVersion {
    /// Create a declared version, normalizing backslash separators in every path.
    pub fn new<I, S>(tag: impl Into<VersionTag>, input_files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tag: tag.into(),
            input_files: input_files
                .into_iter()
                .map(|file| file.as_ref().replace('\\', "/"))
                .collect(),
        }
    }

    pub fn tag(&self) -> &VersionTag {
        &self.tag
    }

    /// Alias for [`DeclaredVersion::tag`] matching the manifest field name.
    pub fn name(&self) -> &str {
        self.tag.as_str()
    }

    pub fn input_files(&self) -> &[String] {
        &self.input_files
    }
}
