//! Enumeration of every version block in a descriptor.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::fence::{find_closing_fence, line_of, normalize_newlines, parse_input_files};
use crate::models::DeclaredVersion;

/// Opening fence comparing the tag against exactly one value.
fn single_tag_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^```[ \t]*yaml \$\(tag\) == '([^'\n]+)'[ \t]*$")
            .expect("single tag fence pattern")
    })
}

/// Every single-tag version block in document order.
///
/// This is an inspection helper and tolerates damage: a block without a
/// closing fence ends the scan, and a block whose body is not valid yaml is
/// skipped. Use [`crate::resolve_block`] when a hard failure is wanted.
pub fn scan_all_versions(document: &str) -> Vec<DeclaredVersion> {
    let document = normalize_newlines(document);
    let mut versions = Vec::new();
    let mut position = 0;

    while let Some(caps) = single_tag_fence().captures_at(&document, position) {
        let (Some(fence), Some(tag)) = (caps.get(0), caps.get(1)) else {
            break;
        };

        let Some((body_end, close_end)) = find_closing_fence(&document, fence.end()) else {
            warn!(
                "Block for tag '{}' at line {} has no closing fence, stopping scan",
                tag.as_str(),
                line_of(&document, fence.start())
            );
            break;
        };

        match parse_input_files(tag.as_str(), &document[fence.end()..body_end]) {
            Ok(files) => versions.push(DeclaredVersion::new(tag.as_str(), files)),
            Err(e) => warn!("Skipping block: {}", e),
        }
        position = close_end;
    }

    debug!("Found {} version blocks", versions.len());
    versions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_blocks_is_empty() {
        assert!(scan_all_versions("").is_empty());
        assert!(scan_all_versions("# Title\n\n``` yaml\nopenapi-type: arm\n```\n").is_empty());
    }

    #[test]
    fn test_alternation_and_conjunction_are_not_enumerated() {
        let readme = "```yaml $(tag) == 'a' || $(tag) == 'b'\ninput-file:\n- x.json\n```\n\n```yaml $(tag) == 'c' && $(go)\nfoo: bar\n```\n\n```yaml $(tag) == 'd'\ninput-file:\n- d.json\n```\n";
        let versions = scan_all_versions(readme);
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].tag(), "d");
    }

    #[test]
    fn test_unterminated_block_keeps_earlier_results() {
        let readme = "```yaml $(tag) == 'one'\ninput-file:\n- a.json\n```\n\n```yaml $(tag) == 'two'\ninput-file:\n- b.json\n";
        let versions = scan_all_versions(readme);
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].tag(), "one");
    }

    #[test]
    fn test_invalid_body_is_skipped() {
        let readme = "```yaml $(tag) == 'bad'\ninput-file: [a.json\n```\n\n```yaml $(tag) == 'good'\ninput-file:\n- g.json\n```\n";
        let versions = scan_all_versions(readme);
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].input_files(), ["g.json"]);
    }
}
