//! Rendering of field values into URI parameters.
//!
//! Values reach the binder as [`serde_json::Value`], captured through the
//! field's `Serialize` implementation. Enums therefore arrive as their wire
//! string, never as an ordinal.

use serde_json::Value;

use crate::{Error, Result};

/// Render a value for a query string or a path segment.
///
/// - strings are used verbatim;
/// - numbers and booleans use their natural form;
/// - arrays are comma-joined, each element rendered with the same rules.
///
/// Objects, and `null` inside an array, fail with
/// [`Error::UnsupportedValueKind`].
///
/// ```
/// use serde_json::json;
///
/// assert_eq!(riff_core::render(&json!(["track", "album"])).unwrap(), "track,album");
/// assert_eq!(riff_core::render(&json!(20)).unwrap(), "20");
/// ```
pub fn render(value: &Value) -> Result<String> {
    render_field("value", value)
}

/// Same as [`render`], naming `field` in the error.
pub fn render_field(field: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Array(items) => {
            let rendered = items
                .iter()
                .map(|item| render_field(field, item))
                .collect::<Result<Vec<_>>>()?;
            Ok(rendered.join(","))
        }
        Value::Null | Value::Object(_) => Err(Error::UnsupportedValueKind {
            field: field.to_string(),
            kind: kind_of(value),
        }),
    }
}

/// Whether a value counts as present for query binding.
///
/// `null` and empty arrays are absent: an empty list is skipped rather than
/// sent as a bare `key=`.
#[must_use]
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
