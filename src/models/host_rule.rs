//! Host rewrite rules.

use serde::{Deserialize, Serialize};

use super::entity::{EntityMeta, impl_entity, require};

const fn default_enabled() -> bool {
    true
}

/// Rewrites requests for one host to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostRule {
    /// Identity and revision metadata.
    #[serde(flatten)]
    pub meta: EntityMeta,
    /// Host pattern to match.
    #[serde(default)]
    pub from: String,
    /// Replacement host.
    #[serde(default)]
    pub to: String,
    /// Whether the rule is applied.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Free-form comment.
    #[serde(default)]
    pub comment: String,
}

impl HostRule {
    /// Creates an enabled rule.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            meta: EntityMeta::default(),
            from: from.into(),
            to: to.into(),
            enabled: true,
            comment: String::new(),
        }
    }
}

fn validate_host_rule(rule: &HostRule) -> std::result::Result<(), String> {
    require("from", &rule.from)
}

impl_entity!(HostRule, validate_host_rule);
