//! Saved and history requests.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::{EntityMeta, impl_entity, require};

/// Discriminates the two request variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    /// A request the user saved explicitly.
    #[default]
    Saved,
    /// A request recorded in the history.
    History,
}

impl RequestType {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::History => "history",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_method() -> String {
    "GET".to_string()
}

/// An HTTP request definition.
///
/// Headers and payload are kept as raw strings; absent values are empty
/// strings, never `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Identity and revision metadata.
    #[serde(flatten)]
    pub meta: EntityMeta,
    /// Saved or history.
    #[serde(rename = "type", default)]
    pub request_type: RequestType,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Request URL.
    #[serde(default)]
    pub url: String,
    /// HTTP method.
    #[serde(default = "default_method")]
    pub method: String,
    /// Raw header block (`Name: value` lines).
    #[serde(default)]
    pub headers: String,
    /// Raw request body.
    #[serde(default)]
    pub payload: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Ids of the projects this request belongs to.
    #[serde(default)]
    pub projects: Vec<String>,
}

impl Request {
    /// Creates a request of the given type with defaults for every field.
    #[must_use]
    pub fn new(request_type: RequestType) -> Self {
        Self {
            meta: EntityMeta::default(),
            request_type,
            name: String::new(),
            url: String::new(),
            method: default_method(),
            headers: String::new(),
            payload: String::new(),
            description: String::new(),
            projects: Vec::new(),
        }
    }

    /// Creates a saved request for a URL.
    #[must_use]
    pub fn saved(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::new(RequestType::Saved)
        }
    }

    /// Creates a history request for a URL.
    #[must_use]
    pub fn history(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::new(RequestType::History)
        }
    }

    /// Sets the id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.meta.id = Some(id.into());
        self
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the method.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Adds a project membership.
    #[must_use]
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.projects.push(project_id.into());
        self
    }
}

fn validate_request(request: &Request) -> std::result::Result<(), String> {
    require("url", &request.url)?;
    let method = request.method.trim();
    if method.is_empty() || method.chars().any(char::is_whitespace) {
        return Err(format!("invalid method '{}'", request.method));
    }
    Ok(())
}

impl_entity!(Request, validate_request);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entity;

    #[test]
    fn test_request_defaults_from_sparse_json() {
        let request: Request =
            serde_json::from_str(r#"{"url": "https://api.example.com"}"#).unwrap();
        assert_eq!(request.request_type, RequestType::Saved);
        assert_eq!(request.method, "GET");
        assert_eq!(request.headers, "");
        assert_eq!(request.payload, "");
        assert!(request.projects.is_empty());
        assert!(request.meta.id.is_none());
    }

    #[test]
    fn test_request_type_serializes_as_literal() {
        let request = Request::history("https://example.com").with_id("h1");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "history");
        assert_eq!(json["_id"], "h1");
    }

    #[test]
    fn test_validate_request() {
        assert!(Request::saved("https://example.com").validate().is_ok());
        assert!(Request::saved("").validate().is_err());
        assert!(
            Request::saved("https://example.com")
                .with_method("GE T")
                .validate()
                .is_err()
        );
    }
}
