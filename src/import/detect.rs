//! Export format detection.
//!
//! Formats are recognized by structural signatures, checked from the most
//! specific to the least specific so that a blob matching several loose
//! signatures resolves to the format it most precisely describes.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::{Error, Result};

/// Known export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// Legacy single document with index-keyed collections.
    LegacyDocument,
    /// Legacy export with requests embedded in projects.
    LegacyObjects,
    /// Document-store export tagged with an `ARC#` kind.
    DocumentStore,
    /// One request object.
    SingleRequest,
    /// Collection format version 1.
    PostmanV1,
    /// Collection format version 2.x.
    PostmanV2,
    /// Exported environment.
    PostmanEnvironment,
}

impl ExportFormat {
    /// Returns all formats in detection priority order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::PostmanV2,
            Self::PostmanV1,
            Self::PostmanEnvironment,
            Self::SingleRequest,
            Self::DocumentStore,
            Self::LegacyDocument,
            Self::LegacyObjects,
        ]
    }

    /// Returns the format name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LegacyDocument => "legacy-document",
            Self::LegacyObjects => "legacy-objects",
            Self::DocumentStore => "document-store",
            Self::SingleRequest => "single-request",
            Self::PostmanV1 => "postman-v1",
            Self::PostmanV2 => "postman-v2",
            Self::PostmanEnvironment => "postman-environment",
        }
    }

    fn matches(self, root: &serde_json::Map<String, Value>) -> bool {
        let is_str = |key: &str| root.get(key).is_some_and(Value::is_string);
        let is_array = |key: &str| root.get(key).is_some_and(Value::is_array);
        let is_object = |key: &str| root.get(key).is_some_and(Value::is_object);

        match self {
            Self::PostmanV2 => root
                .get("info")
                .and_then(|info| info.get("schema"))
                .and_then(Value::as_str)
                .is_some_and(|schema| schema.contains("collection/v2")),
            Self::PostmanV1 => {
                is_str("id")
                    && is_str("name")
                    && is_array("requests")
                    && (is_array("order") || is_array("folders"))
            },
            Self::PostmanEnvironment => {
                is_array("values")
                    && is_str("name")
                    && (root.get("_postman_variable_scope").and_then(Value::as_str)
                        == Some("environment")
                        || !(root.contains_key("requests") || root.contains_key("item")))
            },
            Self::SingleRequest => {
                is_str("url") && is_str("method") && !root.contains_key("requests")
            },
            Self::DocumentStore => root
                .get("kind")
                .and_then(Value::as_str)
                .is_some_and(|kind| kind.starts_with("ARC#")),
            Self::LegacyDocument => {
                is_object("requests")
                    || (!root.contains_key("kind")
                        && (is_object("projects") || is_object("history")))
            },
            Self::LegacyObjects => {
                !root.contains_key("kind")
                    && is_array("projects")
                    && root.get("requests").is_none_or(Value::is_array)
            },
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detects the format of a parsed export.
///
/// # Errors
///
/// Returns [`Error::UnrecognizedFormat`] when the value is not an object or
/// matches no signature.
pub fn detect(data: &Value) -> Result<ExportFormat> {
    let Some(root) = data.as_object() else {
        return Err(Error::UnrecognizedFormat(format!(
            "expected a JSON object at the top level, got {}",
            json_type(data)
        )));
    };

    ExportFormat::all()
        .iter()
        .copied()
        .find(|format| format.matches(root))
        .ok_or_else(|| {
            let mut keys: Vec<&str> = root.keys().map(String::as_str).take(8).collect();
            keys.sort_unstable();
            Error::UnrecognizedFormat(format!(
                "no known export signature matches (top-level keys: {})",
                keys.join(", ")
            ))
        })
}

/// Parses raw export text.
///
/// # Errors
///
/// Returns [`Error::UnrecognizedFormat`] if the text is not JSON.
pub fn parse_blob(text: &str) -> Result<Value> {
    let text = text.trim_start_matches('\u{feff}');
    serde_json::from_str(text)
        .map_err(|e| Error::UnrecognizedFormat(format!("export is not valid JSON: {e}")))
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
