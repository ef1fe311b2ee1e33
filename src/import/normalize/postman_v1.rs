//! Collection format version 1.
//!
//! A collection holds a flat `requests` array; `order` and each folder's
//! `order` list request ids for display. Every request is owned by the single
//! project created for the collection, whether it is listed in an order,
//! a folder, or nowhere.

use serde_json::Value;

use super::fields::{Object, form_pairs, id, integer, records, text, text_or_default};
use super::{NormalizedExport, ProjectLink};
use crate::models::{CanonicalExport, EntityMeta, Project, Request};

/// Normalizes a version 1 collection.
#[must_use]
pub fn normalize(data: &Value) -> NormalizedExport {
    let mut normalized = NormalizedExport::default();
    let Some(root) = data.as_object() else {
        return normalized;
    };
    let export: &mut CanonicalExport = &mut normalized.export;

    let mut project = Project::new(
        text(root, &["name"])
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Unnamed project".to_string()),
    );
    project.meta = EntityMeta {
        id: id(root, &["id"]),
        created: integer(root, &["timestamp"]),
        ..EntityMeta::default()
    };
    project.description = text_or_default(root, &["description"]);
    export.projects.push(project);

    let requests = records(root.get("requests"), "requests");
    let listed = display_order(root);
    for request_id in &listed {
        let position = requests
            .iter()
            .position(|obj| id(obj, &["id"]).as_deref() == Some(request_id.as_str()));
        if let Some(position) = position {
            push_request(&mut normalized, requests[position]);
        }
    }
    // requests not listed in any order keep their array position
    for obj in &requests {
        let listed_here = id(obj, &["id"]).is_some_and(|rid| listed.contains(&rid));
        if !listed_here {
            push_request(&mut normalized, obj);
        }
    }

    normalized
}

/// Returns request ids from the collection order, then from each folder,
/// without duplicates.
fn display_order(root: &Object) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    let mut push_all = |list: Option<&Value>| {
        if let Some(Value::Array(ids)) = list {
            for rid in ids.iter().filter_map(Value::as_str) {
                if !order.iter().any(|existing| existing == rid) {
                    order.push(rid.to_string());
                }
            }
        }
    };

    push_all(root.get("order"));
    for folder in records(root.get("folders"), "folders") {
        push_all(folder.get("order"));
    }
    order
}

fn push_request(normalized: &mut NormalizedExport, obj: &Object) {
    let index = normalized.export.requests.len();
    normalized.export.requests.push(request(obj));
    normalized.links.push(ProjectLink::saved(0, index));
}

fn request(obj: &Object) -> Request {
    let mut request = Request::saved(text_or_default(obj, &["url"]));
    request.meta = EntityMeta {
        id: id(obj, &["id"]),
        created: integer(obj, &["time"]),
        ..EntityMeta::default()
    };
    request.name = text_or_default(obj, &["name"]);
    if let Some(method) = text(obj, &["method"]).filter(|m| !m.trim().is_empty()) {
        request.method = method.trim().to_uppercase();
    }
    request.headers = text_or_default(obj, &["headers"]);
    request.description = text_or_default(obj, &["description"]);
    request.payload = payload(obj);
    request
}

fn payload(obj: &Object) -> String {
    let mode = text(obj, &["dataMode"]).unwrap_or_default();
    let raw = text(obj, &["rawModeData"]).filter(|raw| !raw.is_empty());
    match (mode.as_str(), raw) {
        ("raw", Some(raw)) | ("", Some(raw)) => raw,
        _ => match obj.get("data") {
            Some(Value::String(s)) => s.clone(),
            data => form_pairs(data),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection() -> Value {
        json!({
            "id": "col-1",
            "name": "Shop API",
            "order": ["r2"],
            "folders": [{"id": "f1", "name": "Items", "order": ["r3", "r1"]}],
            "requests": [
                {"id": "r1", "url": "https://shop/items", "method": "get", "collectionId": "col-1"},
                {"id": "r2", "url": "https://shop/login", "method": "POST",
                 "dataMode": "raw", "rawModeData": "{\"u\":1}",
                 "headers": "Content-Type: application/json\n"},
                {"id": "r3", "url": "https://shop/items", "method": "POST", "dataMode": "params",
                 "data": [{"key": "name", "value": "box", "type": "text"},
                          {"key": "qty", "value": "2", "enabled": true}]},
                {"id": "r4", "url": "https://shop/orphan"}
            ]
        })
    }

    #[test]
    fn test_every_request_owned_by_collection() {
        let normalized = normalize(&collection());
        let export = &normalized.export;
        assert_eq!(export.projects.len(), 1);
        assert_eq!(export.projects[0].meta.id.as_deref(), Some("col-1"));
        assert_eq!(export.projects[0].name, "Shop API");
        let ids: Vec<_> = export
            .requests
            .iter()
            .filter_map(|r| r.meta.id.as_deref())
            .collect();
        assert_eq!(ids, vec!["r2", "r3", "r1", "r4"]);
        assert_eq!(normalized.links.len(), 4);
        assert!(normalized.links.iter().all(|link| link.project == 0));
    }

    #[test]
    fn test_payload_modes() {
        let export = normalize(&collection()).export;
        assert_eq!(export.requests[0].payload, "{\"u\":1}");
        assert_eq!(export.requests[0].headers, "Content-Type: application/json\n");
        assert_eq!(export.requests[1].payload, "name=box&qty=2");
        assert_eq!(export.requests[2].method, "GET");
    }
}
