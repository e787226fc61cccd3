//! Value-holders and tolerant coercions for extracted fields.
//!
//! Model replies are loosely shaped: a field may arrive as a bare value or
//! wrapped in a `{"value": …}` holder, numbers may be string-encoded, and
//! scalars may show up where a list is expected. The coercions here absorb
//! all of that; a value that cannot be coerced leaves the template default
//! untouched rather than failing the extraction.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single extractable field: the resolved `value` plus an informational
/// enumeration of permissible values (`pvalues`).
///
/// Reconciliation only ever writes `value`; `pvalues` comes from the
/// registry template and is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slot<T> {
    pub value: T,
    #[serde(default)]
    pub pvalues: Vec<String>,
}

impl<T> Slot<T> {
    /// A slot with a default value and the given permissible values.
    pub fn with_pvalues(value: T, pvalues: &[&str]) -> Self {
        Self {
            value,
            pvalues: pvalues.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Unwraps a `{"value": …}` holder, passing bare values through.
///
/// Late iterations of the prompt programs ask the model for value-holders;
/// earlier ones return flat objects. Both shapes are accepted.
pub fn unwrap_value(raw: &Value) -> &Value {
    match raw {
        Value::Object(map) => map.get("value").unwrap_or(raw),
        _ => raw,
    }
}

/// Renders a scalar JSON value as a string, if it is one.
fn scalar_to_string(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Assigns a scalar string field. Non-scalar or null values are ignored.
pub fn assign_string(slot: &mut Slot<String>, raw: &Value) {
    if let Some(s) = scalar_to_string(unwrap_value(raw)) {
        slot.value = s;
    }
}

/// Assigns a list-shaped field.
///
/// A bare scalar is wrapped into a one-element list; a JSON array keeps its
/// scalar elements (stringified). A bare scalar that renders empty leaves
/// the default untouched, so `""` never becomes `[""]`.
pub fn assign_list(slot: &mut Slot<Vec<String>>, raw: &Value) {
    match unwrap_value(raw) {
        Value::Array(items) => {
            slot.value = items.iter().filter_map(scalar_to_string).collect();
        }
        other => {
            if let Some(s) = scalar_to_string(other) {
                if !s.is_empty() {
                    slot.value = vec![s];
                }
            }
        }
    }
}

/// Assigns an integer count field (`no_of_people`).
///
/// Tries a direct integer conversion first; otherwise strips non-digit
/// characters from the string form and parses what remains. On total
/// failure the template default is kept.
pub fn assign_count(slot: &mut Slot<i64>, raw: &Value) {
    let raw = unwrap_value(raw);
    if let Some(n) = raw.as_i64() {
        slot.value = n;
        return;
    }
    if let Some(s) = scalar_to_string(raw) {
        if let Ok(n) = s.trim().parse::<i64>() {
            slot.value = n;
        } else if let Some(n) = digits_of(&s) {
            tracing::debug!(raw = %s, recovered = n, "recovered count from non-numeric value");
            slot.value = n;
        }
    }
}

/// Assigns a star rating, bounded to a single digit.
///
/// The model sometimes returns `"55"`, `"5 αστέρια"` or `[5]`; the rating
/// scale is 1-5 so only the first digit found is kept.
pub fn assign_stars(slot: &mut Slot<i64>, raw: &Value) {
    let raw = unwrap_value(raw);
    // A list reply like [5] carries the rating in its first element.
    let raw = match raw {
        Value::Array(items) => match items.first() {
            Some(first) => first,
            None => return,
        },
        other => other,
    };
    let text = match scalar_to_string(raw) {
        Some(s) => s,
        None => return,
    };
    if let Some(d) = text.chars().find(|c| c.is_ascii_digit()) {
        slot.value = d.to_digit(10).map(i64::from).unwrap_or(slot.value);
    }
}

/// All digits of `s` concatenated and parsed, or `None` if there are none.
fn digits_of(s: &str) -> Option<i64> {
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
