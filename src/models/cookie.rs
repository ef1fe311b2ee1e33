//! Cookies captured by the client.

use serde::{Deserialize, Serialize};

use super::entity::{EntityMeta, impl_entity, require};

fn default_path() -> String {
    "/".to_string()
}

/// A stored HTTP cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    /// Identity and revision metadata.
    #[serde(flatten)]
    pub meta: EntityMeta,
    /// Cookie name.
    #[serde(default)]
    pub name: String,
    /// Cookie value.
    #[serde(default)]
    pub value: String,
    /// Domain the cookie applies to.
    #[serde(default)]
    pub domain: String,
    /// Path the cookie applies to.
    #[serde(default = "default_path")]
    pub path: String,
    /// Expiry time (epoch milliseconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<i64>,
    /// Not visible to scripts.
    #[serde(default)]
    pub http_only: bool,
    /// Sent over TLS only.
    #[serde(default)]
    pub secure: bool,
    /// Sent to the exact host only.
    #[serde(default)]
    pub host_only: bool,
    /// Discarded at the end of the session.
    #[serde(default)]
    pub session: bool,
}

impl Cookie {
    /// Creates a cookie for a domain.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            meta: EntityMeta::default(),
            name: name.into(),
            value: value.into(),
            domain: domain.into(),
            path: default_path(),
            expires: None,
            http_only: false,
            secure: false,
            host_only: false,
            session: true,
        }
    }
}

fn validate_cookie(cookie: &Cookie) -> std::result::Result<(), String> {
    require("name", &cookie.name)?;
    require("domain", &cookie.domain)
}

impl_entity!(Cookie, validate_cookie);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entity;

    #[test]
    fn test_cookie_field_names() {
        let mut cookie = Cookie::new("sid", "1", "example.com");
        cookie.http_only = true;
        let json = serde_json::to_value(&cookie).unwrap();
        assert_eq!(json["httpOnly"], true);
        assert_eq!(json["path"], "/");
    }

    #[test]
    fn test_cookie_requires_domain() {
        assert!(Cookie::new("sid", "1", "").validate().is_err());
    }
}
