//! Field-safe reads over untrusted JSON response bodies.
//!
//! Upstream payloads carry no schema guarantee: any field may be missing,
//! `null`, or of an unexpected type. Every read in the pipeline goes through
//! [`extract`] (or one of its typed wrappers), which never fails and falls
//! back to a caller-supplied default instead.

use serde_json::Value;

/// Walk `source` along a dot-separated `path`.
///
/// Object keys and array indices are both plain segments, so
/// `"weather.0.icon"` reads the icon of the first weather entry. Returns
/// `None` as soon as a step hits something that is not indexable, or when
/// the resolved value is `null`.
pub fn lookup<'a>(source: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = source;

    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    match current {
        Value::Null => None,
        value => Some(value),
    }
}

/// Resolve `path` in `source`, or return `default`.
///
/// The resolved value is returned as-is: no coercion happens here, so a
/// caller expecting a number still has to check what it got back (see
/// [`number`] and [`text`]).
pub fn extract<'a>(source: &'a Value, path: &str, default: &'a Value) -> &'a Value {
    lookup(source, path).unwrap_or(default)
}

/// Finite number at `path`, or `default`.
pub fn number(source: &Value, path: &str, default: f64) -> f64 {
    lookup(source, path)
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
        .unwrap_or(default)
}

/// Finite number at `path`, if there is one.
pub fn maybe_number(source: &Value, path: &str) -> Option<f64> {
    lookup(source, path)
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
}

/// String at `path`, or `default`.
pub fn text(source: &Value, path: &str, default: &str) -> String {
    lookup(source, path)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// True when `path` resolves to an array with at least one element.
pub fn non_empty_array(source: &Value, path: &str) -> bool {
    lookup(source, path)
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty())
}
