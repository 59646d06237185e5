//! Fenced yaml block primitives shared by the resolver and the scanner.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use serde_yaml::Value;

use crate::error::{ReadmeError, ReadmeResult};

/// A line holding only a closing code fence.
fn closing_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*```[ \t]*$").expect("closing fence pattern"))
}

/// Convert CRLF line endings to LF so line anchors behave the same on every checkout.
pub(crate) fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Byte range of the next closing fence at or after `from`.
pub(crate) fn find_closing_fence(text: &str, from: usize) -> Option<(usize, usize)> {
    closing_fence()
        .find_at(text, from)
        .map(|m| (m.start(), m.end()))
}

/// 1-based line number of a byte offset.
pub(crate) fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}

#[derive(Debug, Deserialize)]
struct BlockBody {
    #[serde(rename = "input-file", default)]
    input_file: Option<Value>,
}

/// Text of a plain yaml scalar. Numbers and booleans are read back as written.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Parse the body of a version block and return its `input-file` entries.
///
/// Only the `input-file` key is read, as a list or a single path. Entries are
/// taken as text without type coercion, so `2019` stays `"2019"`. A body with
/// no yaml content, or without the key, yields an empty list.
pub(crate) fn parse_input_files(tag: &str, body: &str) -> ReadmeResult<Vec<String>> {
    let has_content = body.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#')
    });
    if !has_content {
        return Ok(Vec::new());
    }

    let invalid = |message: String| ReadmeError::InvalidBlock {
        tag: tag.to_string(),
        message,
    };

    let parsed: Option<BlockBody> = serde_yaml::from_str(body).map_err(|e| invalid(e.to_string()))?;

    match parsed.and_then(|b| b.input_file) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Sequence(entries)) => entries
            .iter()
            .filter(|entry| !entry.is_null())
            .map(|entry| {
                scalar_text(entry)
                    .ok_or_else(|| invalid("input-file entries must be plain paths".to_string()))
            })
            .collect(),
        Some(other) => scalar_text(&other)
            .map(|file| vec![file])
            .ok_or_else(|| invalid("input-file must be a path or a list of paths".to_string())),
    }
}
