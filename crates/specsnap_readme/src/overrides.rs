//! Forced version tags for providers whose declared tag is known to be broken.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::VersionTag;

/// Providers whose readme tag currently yields an inconsistent file set.
const BUILTIN_OVERRIDES: &[(&str, &str)] = &[
    // 2019-12 declares duplicate definitions
    ("cosmos-db", "package-2019-08-preview"),
    // 2020-04 references a file missing from the repo
    ("databox", "package-2019-09"),
    ("resources", "package-policy-2019-09"),
    ("storSimple1200Series", "package-2016-10"),
];

/// Mapping from provider name (or API set base folder) to a forced tag.
///
/// Keys are either a bare provider name, applying to every surface of that
/// provider, or a base folder such as `keyvault/data-plane`, which takes
/// precedence for that folder only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideTable {
    entries: BTreeMap<String, VersionTag>,
}

impl OverrideTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The compiled-in table shipped with the tool.
    pub fn builtin() -> Self {
        BUILTIN_OVERRIDES
            .iter()
            .map(|(provider, tag)| (provider.to_string(), VersionTag::from(*tag)))
            .collect()
    }

    pub fn with_entry(mut self, key: impl Into<String>, tag: impl Into<VersionTag>) -> Self {
        self.insert(key, tag);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, tag: impl Into<VersionTag>) {
        self.entries.insert(key.into(), tag.into());
    }

    /// Layer `other` over this table; entries in `other` win.
    pub fn merged(mut self, other: &OverrideTable) -> Self {
        self.entries
            .extend(other.entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Exact lookup by key.
    pub fn get(&self, key: &str) -> Option<&VersionTag> {
        self.entries.get(key)
    }

    /// Lookup for one API surface: the base folder entry first, then the provider entry.
    pub fn lookup(&self, provider_name: &str, base_folder: &str) -> Option<&VersionTag> {
        self.entries
            .get(base_folder)
            .or_else(|| self.entries.get(provider_name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, VersionTag)> for OverrideTable {
    fn from_iter<T: IntoIterator<Item = (String, VersionTag)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
