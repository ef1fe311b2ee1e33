//! Lenient field extraction from untyped export records.
//!
//! Exports written by different tools disagree on field names and value
//! types. These helpers look a field up under several names and coerce what
//! they find, returning `None` instead of failing.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::DateTime;
use serde_json::{Map, Value};

/// A JSON object.
pub type Object = Map<String, Value>;

/// Returns the first of `keys` present with a usable value.
fn first<'a>(obj: &'a Object, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !value.is_null())
}

/// Returns a field as text. Numbers and booleans are rendered.
pub fn text(obj: &Object, keys: &[&str]) -> Option<String> {
    match first(obj, keys)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Returns a field as text, or an empty string.
pub fn text_or_default(obj: &Object, keys: &[&str]) -> String {
    text(obj, keys).unwrap_or_default()
}

/// Returns a non-blank identifier.
pub fn id(obj: &Object, keys: &[&str]) -> Option<String> {
    text(obj, keys).filter(|id| !id.trim().is_empty())
}

/// Returns a field as an integer.
///
/// Accepts numbers (fractions are truncated), numeric strings, and RFC 3339
/// timestamps (converted to epoch milliseconds).
#[allow(clippy::cast_possible_truncation)]
pub fn integer(obj: &Object, keys: &[&str]) -> Option<i64> {
    match first(obj, keys)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                DateTime::parse_from_rfc3339(s)
                    .ok()
                    .map(|dt| dt.timestamp_millis())
            })
        },
        _ => None,
    }
}

/// Returns a field as a boolean.
pub fn boolean(obj: &Object, keys: &[&str]) -> Option<bool> {
    match first(obj, keys)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Returns the string entries of an array field, without duplicates.
///
/// Non-string entries are skipped.
pub fn string_list(obj: &Object, key: &str) -> Vec<String> {
    let mut list: Vec<String> = Vec::new();
    if let Some(Value::Array(items)) = obj.get(key) {
        for item in items {
            if let Some(s) = item.as_str().filter(|s| !s.trim().is_empty()) {
                if !list.iter().any(|existing| existing == s) {
                    list.push(s.to_string());
                }
            }
        }
    }
    list
}

/// Returns the object records of a collection.
///
/// A collection is either an array or a mapping keyed by numeric index; a
/// mapping is returned in index order. Entries that are not objects are
/// skipped with a warning.
pub fn records<'a>(collection: Option<&'a Value>, source: &str) -> Vec<&'a Object> {
    let entries: Vec<&Value> = match collection {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Object(map)) => {
            let mut keyed: Vec<(Option<u64>, &String, &Value)> = map
                .iter()
                .map(|(key, value)| (key.parse::<u64>().ok(), key, value))
                .collect();
            // numeric keys first in numeric order, others after by name
            keyed.sort_by(|a, b| match (a.0, b.0) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.1.cmp(b.1),
            });
            keyed.into_iter().map(|(_, _, value)| value).collect()
        },
        Some(Value::Null) | None => Vec::new(),
        Some(_) => {
            tracing::warn!(source, "collection is neither an array nor a mapping, skipping");
            Vec::new()
        },
    };

    let mut objects = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match entry.as_object() {
            Some(obj) => objects.push(obj),
            None => tracing::warn!(source, index, "skipping record that is not an object"),
        }
    }
    objects
}

/// Returns binary or text content as a string.
///
/// Strings are returned as they are. Byte arrays (plain arrays of numbers or
/// `{"type": "Buffer", "data": [...]}`) are base64 encoded.
pub fn binary_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let bytes: Option<Vec<u8>> = items
                .iter()
                .map(|item| item.as_u64().and_then(|b| u8::try_from(b).ok()))
                .collect();
            bytes.map(|bytes| STANDARD.encode(bytes))
        },
        Value::Object(obj) if obj.get("type").and_then(Value::as_str) == Some("Buffer") => {
            obj.get("data").and_then(binary_text)
        },
        _ => None,
    }
}

/// Renders a payload field as text. Objects and arrays are serialized.
pub fn payload(obj: &Object, keys: &[&str]) -> String {
    match first(obj, keys) {
        Some(Value::String(s)) => s.clone(),
        Some(value @ (Value::Object(_) | Value::Array(_))) => value.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) | None => String::new(),
    }
}

/// Renders headers as `Name: value` lines.
///
/// Strings are kept verbatim. Arrays of `{key|name, value}` objects are
/// rendered one per line, skipping entries marked disabled.
pub fn headers(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_object)
            .filter(|entry| is_enabled(entry))
            .filter_map(|entry| {
                let name = text(entry, &["key", "name"])?;
                let value = text_or_default(entry, &["value"]);
                Some(format!("{name}: {value}"))
            })
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

/// Renders `{key, value}` entries as `key=value` pairs joined by `&`.
///
/// Entries marked disabled are skipped.
pub fn form_pairs(value: Option<&Value>) -> String {
    let Some(Value::Array(items)) = value else {
        return String::new();
    };
    items
        .iter()
        .filter_map(Value::as_object)
        .filter(|entry| is_enabled(entry))
        .filter_map(|entry| {
            let key = text(entry, &["key", "name"])?;
            Some(format!("{key}={}", text_or_default(entry, &["value", "src"])))
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Returns whether an entry is enabled (`enabled` true or `disabled` false).
pub fn is_enabled(entry: &Object) -> bool {
    match (boolean(entry, &["enabled"]), boolean(entry, &["disabled"])) {
        (Some(enabled), _) => enabled,
        (None, Some(disabled)) => !disabled,
        (None, None) => true,
    }
}

/// Returns a description that may be a string or `{content}` object.
pub fn description(obj: &Object) -> String {
    match obj.get("description") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Object(inner)) => text_or_default(inner, &["content"]),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Object {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_text_coerces_scalars() {
        let o = obj(json!({"a": "x", "b": 4, "c": true, "d": null, "e": [1]}));
        assert_eq!(text(&o, &["a"]).as_deref(), Some("x"));
        assert_eq!(text(&o, &["b"]).as_deref(), Some("4"));
        assert_eq!(text(&o, &["c"]).as_deref(), Some("true"));
        assert_eq!(text(&o, &["d", "a"]).as_deref(), Some("x"));
        assert!(text(&o, &["e"]).is_none());
    }

    #[test]
    fn test_integer_forms() {
        let o = obj(json!({
            "n": 12,
            "f": 12.9,
            "s": " 42 ",
            "t": "1970-01-01T00:00:01Z",
            "x": "soon"
        }));
        assert_eq!(integer(&o, &["n"]), Some(12));
        assert_eq!(integer(&o, &["f"]), Some(12));
        assert_eq!(integer(&o, &["s"]), Some(42));
        assert_eq!(integer(&o, &["t"]), Some(1000));
        assert_eq!(integer(&o, &["x"]), None);
    }

    #[test]
    fn test_records_from_index_mapping() {
        let collection = json!({"10": {"n": 3}, "2": {"n": 2}, "0": {"n": 1}, "bad": 5});
        let found = records(Some(&collection), "test");
        let order: Vec<i64> = found.iter().filter_map(|o| integer(o, &["n"])).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_records_skip_non_objects() {
        let collection = json!([{"a": 1}, "nope", 3, {"b": 2}]);
        assert_eq!(records(Some(&collection), "test").len(), 2);
        assert!(records(None, "test").is_empty());
    }

    #[test]
    fn test_binary_text() {
        assert_eq!(binary_text(&json!("PEM")).as_deref(), Some("PEM"));
        assert_eq!(binary_text(&json!([104, 105])).as_deref(), Some("aGk="));
        assert_eq!(
            binary_text(&json!({"type": "Buffer", "data": [104, 105]})).as_deref(),
            Some("aGk=")
        );
        assert!(binary_text(&json!([300])).is_none());
    }

    #[test]
    fn test_headers_skip_disabled() {
        let rendered = headers(Some(&json!([
            {"key": "Accept", "value": "*/*"},
            {"key": "X-Off", "value": "1", "disabled": true},
            {"name": "Host", "value": "a"}
        ])));
        assert_eq!(rendered, "Accept: */*\nHost: a");
        assert_eq!(headers(Some(&json!("A: b"))), "A: b");
    }

    #[test]
    fn test_form_pairs() {
        let rendered = form_pairs(Some(&json!([
            {"key": "a", "value": "1"},
            {"key": "b", "value": "2", "enabled": false},
            {"key": "c"}
        ])));
        assert_eq!(rendered, "a=1&c=");
    }

    #[test]
    fn test_string_list_dedups() {
        let o = obj(json!({"ids": ["a", "b", "a", 3, ""]}));
        assert_eq!(string_list(&o, "ids"), vec!["a", "b"]);
    }
}
