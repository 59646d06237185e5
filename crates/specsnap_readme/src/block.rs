//! Lookup of the version block for a single tag.
//!
//! Matches opening fences such as
//!
//! ````text
//! ```yaml $(tag) == 'package-2019-05'
//! ```yaml $(tag) == 'package-2019-05' || $(tag) == 'package-2019-05-only'
//! ````
//!
//! A fence containing `&&` is conditioned on more than the tag and never matches.

use regex::Regex;
use tracing::debug;

use crate::error::{ReadmeError, ReadmeResult};
use crate::fence::{find_closing_fence, line_of, normalize_newlines, parse_input_files};
use crate::models::{DeclaredVersion, VersionTag};

fn opening_fence(tag: &str) -> ReadmeResult<Regex> {
    let pattern = format!(
        r"(?m)^```[ \t]*yaml [^&^\n]*\$\(tag\) == '{}'[^&^\n]*$",
        regex::escape(tag)
    );
    Regex::new(&pattern).map_err(|e| ReadmeError::InvalidBlock {
        tag: tag.to_string(),
        message: e.to_string(),
    })
}

/// Find the block for `tag` and parse its declared input files.
///
/// Returns `Ok(None)` when no opening fence matches. An opening fence without a
/// closing fence is an error, as is a body that is not valid yaml.
pub fn resolve_block(document: &str, tag: &VersionTag) -> ReadmeResult<Option<DeclaredVersion>> {
    let document = normalize_newlines(document);
    let opening = opening_fence(tag.as_str())?;

    let Some(start) = opening.find(&document) else {
        debug!("No yaml block for tag {}", tag);
        return Ok(None);
    };

    let (body_end, _) =
        find_closing_fence(&document, start.end()).ok_or_else(|| ReadmeError::UnterminatedBlock {
            tag: tag.to_string(),
            line: line_of(&document, start.start()),
        })?;

    let body = &document[start.end()..body_end];
    let files = parse_input_files(tag.as_str(), body)?;
    debug!("Tag {} declares {} input files", tag, files.len());

    Ok(Some(DeclaredVersion::new(tag.clone(), files)))
}
