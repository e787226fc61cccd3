//! Tolerant JSON extraction from free-form model replies.
//!
//! Models rarely answer with bare JSON: the object is usually wrapped in
//! prose or a code fence. Instead of a naive first-`{`/last-`}` slice, the
//! scanner walks the text tracking brace/bracket depth (string- and
//! escape-aware) and parses the first syntactically balanced candidate.

use serde_json::{Map, Value};

/// A parsed extraction payload, distinguishing the two shapes the booking
/// pipeline has to handle.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionPayload {
    /// A single JSON object.
    Object(Map<String, Value>),
    /// An array of JSON objects (one booking per attendee).
    Array(Vec<Map<String, Value>>),
}

impl ExtractionPayload {
    /// Returns the object map if this is a single-object payload.
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            ExtractionPayload::Object(map) => Some(map),
            ExtractionPayload::Array(_) => None,
        }
    }
}

/// Scans `text` for the first balanced JSON value and parses it.
///
/// Non-object array elements are dropped; an array with no objects left, an
/// empty candidate list, or a parse failure all yield `None`.
pub fn scan_json(text: &str) -> Option<ExtractionPayload> {
    let bytes = text.as_bytes();
    let mut start = 0;

    while let Some(open) = find_opening(bytes, start) {
        if let Some(end) = balanced_end(bytes, open) {
            let candidate = &text[open..=end];
            match serde_json::from_str::<Value>(candidate) {
                Ok(Value::Object(map)) => return Some(ExtractionPayload::Object(map)),
                Ok(Value::Array(items)) => {
                    let objects: Vec<Map<String, Value>> = items
                        .into_iter()
                        .filter_map(|v| match v {
                            Value::Object(map) => Some(map),
                            _ => None,
                        })
                        .collect();
                    if objects.is_empty() {
                        // An array of scalars is not an extraction payload;
                        // keep scanning past it.
                        start = open + 1;
                        continue;
                    }
                    return Some(ExtractionPayload::Array(objects));
                }
                _ => {
                    tracing::debug!("balanced candidate failed to parse, continuing scan");
                    start = open + 1;
                }
            }
        } else {
            start = open + 1;
        }
    }

    None
}

/// Index of the next `{` or `[` at or after `from`.
fn find_opening(bytes: &[u8], from: usize) -> Option<usize> {
    bytes[from..]
        .iter()
        .position(|&b| b == b'{' || b == b'[')
        .map(|i| from + i)
}

/// Index of the byte closing the value opened at `open`, depth-counted and
/// ignoring braces inside string literals.
fn balanced_end(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}
