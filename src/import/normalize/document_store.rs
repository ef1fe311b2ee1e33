//! Document-store exports.
//!
//! Each kind is exported under its store name (`url-history`) or its
//! camelCase key (`urlHistory`); older exports used `saved` for requests.
//! Records already use canonical field names.

use serde_json::{Map, Value};

use super::fields::{Object, records};
use super::{NormalizedExport, records as map};
use crate::models::{CanonicalExport, RequestType};

/// Returns the records stored under any of `keys`.
fn collection<'a>(root: &'a Map<String, Value>, keys: &[&str]) -> Vec<&'a Object> {
    keys.iter()
        .filter_map(|key| root.get(*key).map(|value| (*key, value)))
        .flat_map(|(key, value)| records(Some(value), key))
        .collect()
}

/// Normalizes a document-store export.
#[must_use]
pub fn normalize(data: &Value) -> NormalizedExport {
    let mut export = CanonicalExport::new();
    let Some(root) = data.as_object() else {
        return NormalizedExport::unlinked(export);
    };

    export.requests = collection(root, &["requests", "saved"])
        .into_iter()
        .map(|obj| map::request(obj, RequestType::Saved))
        .collect();
    export.history = collection(root, &["history"])
        .into_iter()
        .map(|obj| map::request(obj, RequestType::History))
        .collect();
    export.projects = collection(root, &["projects", "legacy-projects"])
        .into_iter()
        .map(map::project)
        .collect();
    export.environments = collection(root, &["environments"])
        .into_iter()
        .map(map::environment)
        .collect();
    export.variables = collection(root, &["variables"])
        .into_iter()
        .map(map::variable)
        .collect();
    export.cookies = collection(root, &["cookies"])
        .into_iter()
        .map(map::cookie)
        .collect();
    export.url_history = collection(root, &["url-history", "urlHistory"])
        .into_iter()
        .map(map::url_history)
        .collect();
    export.websocket_url_history =
        collection(root, &["websocket-url-history", "websocketUrlHistory"])
            .into_iter()
            .map(map::url_history)
            .collect();
    export.auth_data = collection(root, &["auth-data", "authData"])
        .into_iter()
        .map(map::auth_data)
        .collect();
    export.host_rules = collection(root, &["host-rules", "hostRules"])
        .into_iter()
        .map(map::host_rule)
        .collect();
    export.client_certificates = collection(root, &["client-certificates", "clientCertificates"])
        .into_iter()
        .map(map::certificate)
        .collect();

    NormalizedExport::unlinked(export)
}
