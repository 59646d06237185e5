//! Automatic choice of the newest stable version.

use crate::models::DeclaredVersion;

/// Pick the declared version with the greatest tag, ignoring the aggregate
/// sentinel and preview tags.
///
/// Tags are compared as text. For `package-YYYY-MM[-DD]` tags that is release
/// order; any other naming scheme is compared the same way without warning.
pub fn select_best(versions: &[DeclaredVersion]) -> Option<&DeclaredVersion> {
    versions
        .iter()
        .filter(|version| version.tag().is_selectable())
        .max_by(|a, b| a.tag().cmp(b.tag()))
}
