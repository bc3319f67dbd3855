//! JSON configuration fragments embedded as HTML comments.

use memchr::memmem;
use serde_json::{Map, Value};
use tracing::debug;

const OPEN: &str = "<!--";
const CLOSE: &str = "-->";

/// One successfully parsed configuration fragment.
///
/// A fragment contributes up to three sub-objects: `data` merges into the
/// chart data, `defaultOptions` and `options` merge into the chart options,
/// in that order. Anything else in the fragment is ignored.
#[derive(Debug, Default, Clone)]
pub struct Fragment {
    pub data: Option<Map<String, Value>>,
    pub default_options: Option<Map<String, Value>>,
    pub options: Option<Map<String, Value>>,
}

impl Fragment {
    /// Parses the inner text of one comment. Returns `None` for anything
    /// that is not a JSON object; a malformed fragment is skipped, never an
    /// error.
    pub fn parse(comment: &str) -> Option<Fragment> {
        let value: Value = match serde_json::from_str(comment.trim()) {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "skipping malformed chart fragment");
                return None;
            }
        };

        let mut object = match value {
            Value::Object(object) => object,
            _ => {
                debug!("skipping non-object chart fragment");
                return None;
            }
        };

        let sub = |object: &mut Map<String, Value>, key: &str| {
            match object.remove(key) {
                Some(Value::Object(map)) => Some(map),
                _ => None,
            }
        };

        Some(Fragment {
            data: sub(&mut object, "data"),
            default_options: sub(&mut object, "defaultOptions"),
            options: sub(&mut object, "options"),
        })
    }
}

/// Extracts the inner text of every `<!-- -->` comment, in document order.
/// An unterminated comment is not a comment; it stays in the text.
pub fn comments(input: &str) -> Vec<&str> {
    let mut found = vec![];
    let mut rest = input;
    while let Some(start) = memmem::find(rest.as_bytes(), OPEN.as_bytes()) {
        let after = &rest[start + OPEN.len()..];
        let Some(end) = memmem::find(after.as_bytes(), CLOSE.as_bytes()) else { break };
        found.push(&after[..end]);
        rest = &after[end + CLOSE.len()..];
    }

    found
}

/// Returns `input` with every comment removed.
pub fn without_comments(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;
    loop {
        match memmem::find(rest.as_bytes(), OPEN.as_bytes()) {
            Some(start) => {
                output.push_str(&rest[..start]);
                let after = &rest[start + OPEN.len()..];
                match memmem::find(after.as_bytes(), CLOSE.as_bytes()) {
                    Some(end) => rest = &after[end + CLOSE.len()..],
                    None => {
                        output.push_str(&rest[start..]);
                        break;
                    }
                }
            }
            None => {
                output.push_str(rest);
                break;
            }
        }
    }

    output
}

/// All fragments parsed from `input`'s comments; malformed ones skipped.
pub fn fragments(input: &str) -> Vec<Fragment> {
    comments(input).into_iter().filter_map(Fragment::parse).collect()
}
