//! Untyped documents as held by the store.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Field holding the document id.
pub const ID_FIELD: &str = "_id";
/// Field holding the revision token.
pub const REV_FIELD: &str = "_rev";

/// A JSON object stored under a kind and an id.
///
/// Entities are converted to documents on the way into the store and back on
/// the way out; the store itself only reads `_id`, `_rev`, and the fields used
/// for ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes an entity into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not serialize to a JSON object.
    pub fn from_entity<E: Serialize>(entity: &E) -> Result<Self> {
        let value = serde_json::to_value(entity).map_err(|e| Error::OperationFailed {
            operation: "serialize_document".to_string(),
            cause: e.to_string(),
        })?;
        Self::from_value(value)
    }

    /// Wraps a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the value is not an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::InvalidInput(format!(
                "document must be a JSON object, got {}",
                value_type(&other)
            ))),
        }
    }

    /// Deserializes the document into an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not match the entity shape.
    pub fn into_entity<E: DeserializeOwned>(self) -> Result<E> {
        serde_json::from_value(Value::Object(self.0)).map_err(|e| Error::OperationFailed {
            operation: "deserialize_document".to_string(),
            cause: e.to_string(),
        })
    }

    /// Returns the document id.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.0.get(ID_FIELD).and_then(Value::as_str)
    }

    /// Sets the document id.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.0.insert(ID_FIELD.to_string(), Value::String(id.into()));
    }

    /// Returns the revision token.
    #[must_use]
    pub fn rev(&self) -> Option<&str> {
        self.0.get(REV_FIELD).and_then(Value::as_str)
    }

    /// Sets or clears the revision token.
    pub fn set_rev(&mut self, rev: Option<String>) {
        match rev {
            Some(rev) => {
                self.0.insert(REV_FIELD.to_string(), Value::String(rev));
            },
            None => {
                self.0.remove(REV_FIELD);
            },
        }
    }

    /// Returns a numeric field as an integer.
    #[must_use]
    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.0.get(field).and_then(Value::as_i64)
    }

    /// Sets a numeric field.
    pub fn set_i64(&mut self, field: &str, value: i64) {
        self.0.insert(field.to_string(), Value::from(value));
    }

    /// Returns a string field.
    #[must_use]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Returns a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns the underlying object.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Returns a copy of the body without the revision token.
    ///
    /// Used for content hashing.
    #[must_use]
    pub fn body_without_rev(&self) -> Map<String, Value> {
        let mut body = self.0.clone();
        body.remove(REV_FIELD);
        body
    }

    /// Returns whether any string field contains `needle` (case-insensitive).
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        self.0
            .iter()
            .filter(|(key, _)| key.as_str() != REV_FIELD)
            .any(|(_, value)| value_contains(value, needle))
    }

    /// Converts the document into a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

fn value_contains(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(s) => s.to_lowercase().contains(needle),
        Value::Array(items) => items.iter().any(|item| value_contains(item, needle)),
        _ => false,
    }
}

const fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Project;
    use serde_json::json;

    #[test]
    fn test_entity_roundtrip_keeps_identity() {
        let project = Project::new("API").with_id("p1");
        let doc = Document::from_entity(&project).unwrap();
        assert_eq!(doc.id(), Some("p1"));
        assert!(doc.rev().is_none());

        let back: Project = doc.into_entity().unwrap();
        assert_eq!(back, project);
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(Document::from_value(json!([1, 2])).is_err());
    }

    #[test]
    fn test_rev_handling() {
        let mut doc = Document::from_value(json!({"_id": "a", "name": "x"})).unwrap();
        doc.set_rev(Some("1-abc".to_string()));
        assert_eq!(doc.rev(), Some("1-abc"));
        assert!(!doc.body_without_rev().contains_key(REV_FIELD));
        doc.set_rev(None);
        assert!(doc.rev().is_none());
    }

    #[test]
    fn test_matches_text() {
        let doc = Document::from_value(json!({
            "_id": "a",
            "url": "https://API.example.com",
            "projects": ["Alpha"]
        }))
        .unwrap();
        assert!(doc.matches_text("api.example"));
        assert!(doc.matches_text("alpha"));
        assert!(!doc.matches_text("beta"));
    }
}
