//! Collection format version 2.
//!
//! Requests live in a tree of `item`s: folders hold further `item`s and
//! leaves hold a `request`. The tree is flattened depth-first and every leaf
//! is owned by the project created for the collection.

use serde_json::{Value, json};

use super::fields::{
    Object, description, form_pairs, headers, id, is_enabled, records, text, text_or_default,
};
use super::{NormalizedExport, ProjectLink};
use crate::models::{DEFAULT_ENVIRONMENT, Environment, Project, Request, Variable};

/// Normalizes a version 2 collection.
#[must_use]
pub fn normalize(data: &Value) -> NormalizedExport {
    let mut normalized = NormalizedExport::default();
    let Some(root) = data.as_object() else {
        return normalized;
    };
    let info = root.get("info").and_then(Value::as_object);

    let mut project = Project::new(
        info.and_then(|info| text(info, &["name"]))
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Unnamed project".to_string()),
    );
    project.meta.id = info.and_then(|info| id(info, &["_postman_id", "id"]));
    project.description = info.map(description).unwrap_or_default();
    normalized.export.projects.push(project);

    let mut leaves = Vec::new();
    collect_leaves(root, &mut leaves);
    for leaf in leaves {
        let index = normalized.export.requests.len();
        normalized.export.requests.push(request(leaf));
        normalized.links.push(ProjectLink::saved(0, index));
    }

    // collection variables carry no stable key, so each import adds new ones
    for entry in records(root.get("variable"), "variable") {
        let Some(name) = text(entry, &["key", "name"]).filter(|n| !n.trim().is_empty()) else {
            continue;
        };
        let mut variable = Variable::new(name, text_or_default(entry, &["value"]))
            .in_environment(DEFAULT_ENVIRONMENT);
        variable.enabled = is_enabled(entry);
        normalized.export.variables.push(variable);
    }

    // the owning environment keeps a fixed id so re-imports update one record
    if !normalized.export.variables.is_empty() {
        let mut environment = Environment::new(DEFAULT_ENVIRONMENT);
        environment.meta.id = Some(DEFAULT_ENVIRONMENT.to_string());
        normalized.export.environments.push(environment);
    }

    normalized
}

/// Collects leaf items depth-first.
///
/// Uses an explicit stack so arbitrarily deep folder nesting cannot overflow
/// the call stack.
fn collect_leaves<'a>(root: &'a Object, leaves: &mut Vec<&'a Object>) {
    let mut stack: Vec<std::slice::Iter<'a, Value>> = Vec::new();
    if let Some(Value::Array(items)) = root.get("item") {
        stack.push(items.iter());
    }

    while let Some(top) = stack.last_mut() {
        let Some(next) = top.next() else {
            stack.pop();
            continue;
        };
        let Some(item) = next.as_object() else {
            tracing::warn!("skipping collection item that is not an object");
            continue;
        };
        if item.contains_key("request") {
            leaves.push(item);
        }
        if let Some(Value::Array(children)) = item.get("item") {
            stack.push(children.iter());
        }
    }
}

fn request(item: &Object) -> Request {
    let mut request = Request::saved("");
    request.meta.id = id(item, &["id", "_postman_id"]);
    request.name = text_or_default(item, &["name"]);

    match item.get("request") {
        Some(Value::String(url)) => request.url.clone_from(url),
        Some(Value::Object(req)) => {
            request.url = url(req.get("url"));
            if let Some(method) = text(req, &["method"]).filter(|m| !m.trim().is_empty()) {
                request.method = method.trim().to_uppercase();
            }
            request.headers = headers(req.get("header"));
            request.payload = body(req.get("body").and_then(Value::as_object));
            request.description = description(req);
        },
        _ => {},
    }
    if request.description.is_empty() {
        request.description = description(item);
    }
    request
}

fn url(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(url)) => url.clone(),
        Some(Value::Object(url)) => text(url, &["raw"]).unwrap_or_else(|| assemble_url(url)),
        _ => String::new(),
    }
}

/// Builds a URL from its parts when `raw` is missing.
fn assemble_url(url: &Object) -> String {
    let join = |key: &str, sep: &str| match url.get(key) {
        Some(Value::Array(parts)) => parts
            .iter()
            .filter_map(|part| {
                part.as_str()
                    .map(str::to_string)
                    .or_else(|| part.as_object().and_then(|o| text(o, &["value"])))
            })
            .collect::<Vec<_>>()
            .join(sep),
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    };

    let mut assembled = String::new();
    if let Some(protocol) = text(url, &["protocol"]) {
        assembled.push_str(&protocol);
        assembled.push_str("://");
    }
    assembled.push_str(&join("host", "."));
    let path = join("path", "/");
    if !path.is_empty() {
        assembled.push('/');
        assembled.push_str(&path);
    }
    let query = form_pairs(url.get("query"));
    if !query.is_empty() {
        assembled.push('?');
        assembled.push_str(&query);
    }
    assembled
}

fn body(body: Option<&Object>) -> String {
    let Some(body) = body else {
        return String::new();
    };
    match text(body, &["mode"]).as_deref() {
        Some("urlencoded") => form_pairs(body.get("urlencoded")),
        Some("formdata") => form_pairs(body.get("formdata")),
        Some("graphql") => graphql(body.get("graphql").and_then(Value::as_object)),
        Some("file") => body
            .get("file")
            .and_then(Value::as_object)
            .map(|file| text_or_default(file, &["src"]))
            .unwrap_or_default(),
        _ => text_or_default(body, &["raw"]),
    }
}

fn graphql(graphql: Option<&Object>) -> String {
    let Some(graphql) = graphql else {
        return String::new();
    };
    let query = text_or_default(graphql, &["query"]);
    let variables = match graphql.get("variables") {
        Some(Value::String(s)) if !s.trim().is_empty() => {
            serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.clone()))
        },
        Some(Value::Object(o)) => Value::Object(o.clone()),
        _ => Value::Object(serde_json::Map::new()),
    };
    json!({"query": query, "variables": variables}).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RequestType;

    fn collection() -> Value {
        json!({
            "info": {
                "_postman_id": "6f1c-col",
                "name": "Payments",
                "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
            },
            "item": [
                {"name": "Health", "request": "https://pay/health"},
                {"name": "L1", "item": [
                    {"name": "L2", "item": [
                        {"name": "L3", "item": [
                            {"name": "Deep", "id": "deep-1", "request": {
                                "method": "post",
                                "url": {"raw": "https://pay/deep?x=1"},
                                "header": [
                                    {"key": "Accept", "value": "application/json"},
                                    {"key": "X-Debug", "value": "1", "disabled": true}
                                ],
                                "body": {"mode": "urlencoded", "urlencoded": [
                                    {"key": "a", "value": "1"},
                                    {"key": "b", "value": "2", "disabled": true}
                                ]}
                            }}
                        ]}
                    ]}
                ]},
                {"name": "Query", "request": {
                    "method": "POST",
                    "url": {"protocol": "https", "host": ["pay", "example"], "path": ["graphql"]},
                    "body": {"mode": "graphql", "graphql": {"query": "{ me }", "variables": "{\"a\":1}"}}
                }}
            ],
            "variable": [
                {"key": "base", "value": "https://pay"},
                {"key": "off", "value": "x", "disabled": true},
                {"value": "no name"}
            ]
        })
    }

    #[test]
    fn test_flattens_depth_first() {
        let normalized = normalize(&collection());
        let export = &normalized.export;
        let names: Vec<_> = export.requests.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Health", "Deep", "Query"]);
        assert_eq!(export.projects.len(), 1);
        assert_eq!(export.projects[0].meta.id.as_deref(), Some("6f1c-col"));
        assert_eq!(normalized.links.len(), 3);
        assert!(normalized.links.iter().all(|l| l.project == 0));
        assert!(export.requests.iter().all(|r| r.request_type == RequestType::Saved));
    }

    #[test]
    fn test_request_fields() {
        let export = normalize(&collection()).export;
        assert_eq!(export.requests[0].url, "https://pay/health");
        assert_eq!(export.requests[0].method, "GET");

        let deep = &export.requests[1];
        assert_eq!(deep.meta.id.as_deref(), Some("deep-1"));
        assert_eq!(deep.method, "POST");
        assert_eq!(deep.url, "https://pay/deep?x=1");
        assert_eq!(deep.headers, "Accept: application/json");
        assert_eq!(deep.payload, "a=1");

        let query = &export.requests[2];
        assert_eq!(query.url, "https://pay.example/graphql");
        let payload: Value = serde_json::from_str(&query.payload).unwrap();
        assert_eq!(payload["query"], "{ me }");
        assert_eq!(payload["variables"]["a"], 1);
    }

    #[test]
    fn test_collection_variables() {
        let export = normalize(&collection()).export;
        assert_eq!(export.variables.len(), 2);
        assert!(export.variables.iter().all(|v| v.meta.id.is_none()));
        assert!(export.variables.iter().all(|v| v.environment == DEFAULT_ENVIRONMENT));
        assert!(!export.variables[1].enabled);
        assert_eq!(export.environments.len(), 1);
        assert_eq!(export.environments[0].name, DEFAULT_ENVIRONMENT);
    }

    #[test]
    fn test_no_environment_without_variables() {
        let mut data = collection();
        data.as_object_mut().unwrap().remove("variable");
        assert!(normalize(&data).export.environments.is_empty());
    }
}
