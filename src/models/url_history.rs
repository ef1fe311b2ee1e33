//! URL history entries (HTTP and websocket).

use serde::{Deserialize, Serialize};

use super::entity::{EntityMeta, impl_entity, require};

const fn default_count() -> u64 {
    1
}

/// A previously used URL with its use count.
///
/// The same record shape backs both the HTTP and the websocket URL history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlHistory {
    /// Identity and revision metadata.
    #[serde(flatten)]
    pub meta: EntityMeta,
    /// The URL.
    #[serde(default)]
    pub url: String,
    /// Number of times the URL was used.
    #[serde(default = "default_count")]
    pub cnt: u64,
    /// Last use (epoch milliseconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
}

impl UrlHistory {
    /// Creates an entry used once.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            meta: EntityMeta::default(),
            url: url.into(),
            cnt: default_count(),
            time: None,
        }
    }
}

fn validate_url_history(entry: &UrlHistory) -> std::result::Result<(), String> {
    require("url", &entry.url)
}

impl_entity!(UrlHistory, validate_url_history);
