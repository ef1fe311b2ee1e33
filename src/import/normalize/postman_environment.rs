//! Environment exports.

use serde_json::Value;

use super::NormalizedExport;
use super::fields::{id, integer, is_enabled, records, text, text_or_default};
use crate::models::{CanonicalExport, Environment, Variable};

/// Normalizes an exported environment and its values.
///
/// The environment keeps the exported `id`, so re-importing updates it.
/// Values have no ids of their own and are bound to the environment by name.
#[must_use]
pub fn normalize(data: &Value) -> NormalizedExport {
    let mut export = CanonicalExport::new();
    let Some(root) = data.as_object() else {
        return NormalizedExport::unlinked(export);
    };

    let name = text_or_default(root, &["name"]);
    let mut environment = Environment::new(name.clone());
    environment.meta.id = id(root, &["id", "_id"]);
    environment.meta.created = integer(root, &["_postman_exported_at"]);
    export.environments.push(environment);

    for entry in records(root.get("values"), "values") {
        let Some(key) = text(entry, &["key", "name"]).filter(|k| !k.trim().is_empty()) else {
            tracing::warn!("skipping environment value without a key");
            continue;
        };
        let mut variable =
            Variable::new(key, text_or_default(entry, &["value"])).in_environment(name.clone());
        variable.enabled = is_enabled(entry);
        export.variables.push(variable);
    }

    NormalizedExport::unlinked(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_environment_and_values() {
        let normalized = normalize(&json!({
            "id": "84c5-env",
            "name": "Staging",
            "values": [
                {"key": "host", "value": "staging.example", "enabled": true, "type": "text"},
                {"key": "token", "value": "t", "enabled": false},
                {"value": "dangling"}
            ],
            "_postman_variable_scope": "environment",
            "_postman_exported_at": "2024-01-01T00:00:00.000Z"
        }));
        let export = normalized.export;
        assert_eq!(export.environments.len(), 1);
        assert_eq!(export.environments[0].meta.id.as_deref(), Some("84c5-env"));
        assert_eq!(export.environments[0].meta.created, Some(1_704_067_200_000));
        assert_eq!(export.variables.len(), 2);
        assert!(export.variables.iter().all(|v| v.environment == "Staging"));
        assert!(export.variables.iter().all(|v| v.meta.id.is_none()));
        assert!(!export.variables[1].enabled);
        assert!(export.requests.is_empty());
    }
}
