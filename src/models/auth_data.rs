//! Cached authentication data.

use serde::{Deserialize, Serialize};

use super::entity::{EntityMeta, impl_entity, require};

fn default_auth_type() -> String {
    "basic".to_string()
}

/// Credentials remembered for a URL (basic or NTLM).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    /// Identity and revision metadata.
    #[serde(flatten)]
    pub meta: EntityMeta,
    /// Authorization method name.
    #[serde(rename = "type", default = "default_auth_type")]
    pub auth_type: String,
    /// URL the credentials apply to.
    #[serde(default)]
    pub url: String,
    /// User name.
    #[serde(default)]
    pub username: String,
    /// Password.
    #[serde(default)]
    pub password: String,
    /// NTLM domain.
    #[serde(default)]
    pub domain: String,
}

impl AuthData {
    /// Creates basic credentials for a URL.
    #[must_use]
    pub fn basic(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            meta: EntityMeta::default(),
            auth_type: default_auth_type(),
            url: url.into(),
            username: username.into(),
            password: password.into(),
            domain: String::new(),
        }
    }
}

fn validate_auth_data(data: &AuthData) -> std::result::Result<(), String> {
    require("url", &data.url)
}

impl_entity!(AuthData, validate_auth_data);
