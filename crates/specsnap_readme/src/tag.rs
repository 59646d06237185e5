//! Active version tag extraction.
//!
//! An AutoRest readme declares its default tag in a metadata block:
//!
//! ```text
//! openapi-type: arm
//! tag: package-2019-05
//! ```
//!
//! The [`OverrideTable`] is consulted first and bypasses the document entirely.

use std::sync::OnceLock;

use regex::Regex;

use crate::fence::normalize_newlines;
use crate::models::VersionTag;
use crate::overrides::OverrideTable;

fn tag_header() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"openapi-type: [a-z-]+\ntag: ([a-z0-9-]+)").expect("tag header pattern")
    })
}

/// The tag declared by the document's metadata header, if any.
pub fn declared_tag(document: &str) -> Option<VersionTag> {
    let document = normalize_newlines(document);
    tag_header()
        .captures(&document)
        .and_then(|caps| caps.get(1))
        .map(|m| VersionTag::from(m.as_str()))
}

/// Resolve the active tag for a provider: an override entry for the provider
/// name, else the tag declared in the document.
pub fn resolve_tag(
    provider_name: &str,
    document: &str,
    overrides: &OverrideTable,
) -> Option<VersionTag> {
    if let Some(tag) = overrides.get(provider_name) {
        return Some(tag.clone());
    }
    declared_tag(document)
}

/// Like [`resolve_tag`], but also honours an override keyed by the surface's base folder.
pub fn resolve_surface_tag(
    provider_name: &str,
    base_folder: &str,
    document: &str,
    overrides: &OverrideTable,
) -> Option<VersionTag> {
    if let Some(tag) = overrides.lookup(provider_name, base_folder) {
        return Some(tag.clone());
    }
    declared_tag(document)
}
