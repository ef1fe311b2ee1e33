//! Field-by-field mapping of export records onto canonical entities.
//!
//! Shared by every normalizer whose records already use the canonical field
//! names, possibly under older aliases. Unknown fields are dropped; missing
//! ones take the entity defaults.

use serde_json::Value;

use super::fields::{
    Object, binary_text, boolean, headers, id, integer, payload, string_list, text,
    text_or_default,
};
use crate::models::{
    AuthData, CertificateMaterial, CertificateType, ClientCertificate, Cookie, EntityMeta,
    Environment, HostRule, Project, Request, RequestType, UrlHistory, Variable,
    DEFAULT_ENVIRONMENT,
};

const ID_KEYS: &[&str] = &["_id", "key"];

/// Reads identity and timestamps. Incoming revisions are never kept.
pub fn meta(obj: &Object) -> EntityMeta {
    EntityMeta {
        id: id(obj, ID_KEYS),
        rev: None,
        created: integer(obj, &["created", "time"]),
        updated: integer(obj, &["updated", "updateTime"]),
    }
}

/// Maps a request record. The type comes from the collection it was in.
pub fn request(obj: &Object, request_type: RequestType) -> Request {
    let method = text(obj, &["method"])
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "GET".to_string());

    Request {
        meta: meta(obj),
        request_type,
        name: text_or_default(obj, &["name", "title"]),
        url: text_or_default(obj, &["url"]),
        method,
        headers: headers(obj.get("headers")),
        payload: payload(obj, &["payload", "body"]),
        description: super::fields::description(obj),
        projects: string_list(obj, "projects"),
    }
}

/// Maps a project record.
///
/// Only string entries of `requests` are kept; they are request ids and are
/// preserved even when no such request exists.
pub fn project(obj: &Object) -> Project {
    let mut project = Project::new(
        text(obj, &["name", "title"])
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Unnamed project".to_string()),
    );
    project.meta = meta(obj);
    project.description = super::fields::description(obj);
    project.order = integer(obj, &["order"]).unwrap_or(0);
    project.requests = string_list(obj, "requests");
    project
}

/// Maps an environment record.
pub fn environment(obj: &Object) -> Environment {
    let mut environment = Environment::new(text_or_default(obj, &["name"]));
    environment.meta = meta(obj);
    environment.description = super::fields::description(obj);
    environment
}

/// Maps a variable record.
pub fn variable(obj: &Object) -> Variable {
    let mut variable = Variable::new(
        text_or_default(obj, &["name", "variable", "key"]),
        text_or_default(obj, &["value"]),
    )
    .in_environment(
        text(obj, &["environment"])
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
    );
    // "key" is a variable name here, so only "_id" identifies the record
    variable.meta = EntityMeta {
        id: id(obj, &["_id"]),
        ..meta(obj)
    };
    variable.enabled = super::fields::is_enabled(obj);
    variable
}

/// Maps a cookie record.
pub fn cookie(obj: &Object) -> Cookie {
    let mut cookie = Cookie::new(
        text_or_default(obj, &["name"]),
        text_or_default(obj, &["value"]),
        text_or_default(obj, &["domain"]),
    );
    cookie.meta = meta(obj);
    if let Some(path) = text(obj, &["path"]).filter(|p| !p.is_empty()) {
        cookie.path = path;
    }
    cookie.expires = integer(obj, &["expires", "expirationDate"]);
    cookie.http_only = boolean(obj, &["httpOnly", "http_only"]).unwrap_or(false);
    cookie.secure = boolean(obj, &["secure"]).unwrap_or(false);
    cookie.host_only = boolean(obj, &["hostOnly", "host_only"]).unwrap_or(false);
    cookie.session = boolean(obj, &["session"]).unwrap_or(cookie.expires.is_none());
    cookie
}

/// Maps a URL history record.
pub fn url_history(obj: &Object) -> UrlHistory {
    let mut entry = UrlHistory::new(text(obj, &["url"]).unwrap_or_else(|| {
        // older exports keyed URL history by the URL itself
        text_or_default(obj, &["_id", "key"])
    }));
    entry.meta = meta(obj);
    entry.cnt = integer(obj, &["cnt", "count"])
        .and_then(|c| u64::try_from(c).ok())
        .unwrap_or(1);
    entry.time = integer(obj, &["time"]);
    entry
}

/// Maps an auth data record.
pub fn auth_data(obj: &Object) -> AuthData {
    let mut data = AuthData::basic(
        text_or_default(obj, &["url"]),
        text_or_default(obj, &["username"]),
        text_or_default(obj, &["password"]),
    );
    data.meta = meta(obj);
    if let Some(kind) = text(obj, &["type"]).filter(|t| !t.trim().is_empty()) {
        data.auth_type = kind.to_lowercase();
    }
    data.domain = text_or_default(obj, &["domain"]);
    data
}

/// Maps a host rule record.
pub fn host_rule(obj: &Object) -> HostRule {
    let mut rule = HostRule::new(
        text_or_default(obj, &["from"]),
        text_or_default(obj, &["to"]),
    );
    rule.meta = meta(obj);
    rule.enabled = boolean(obj, &["enabled"]).unwrap_or(true);
    rule.comment = text_or_default(obj, &["comment"]);
    rule
}

/// Maps a client certificate with inline material.
pub fn certificate(obj: &Object) -> ClientCertificate {
    let cert_type = match text(obj, &["type"]).map(|t| t.to_lowercase()).as_deref() {
        Some("pem") => CertificateType::Pem,
        _ => CertificateType::P12,
    };
    let mut certificate = ClientCertificate::new(text_or_default(obj, &["name"]), cert_type, "");
    certificate.meta = meta(obj);
    certificate.cert = obj.get("cert").map(material).unwrap_or_default();
    certificate.key = obj.get("key").filter(|v| !v.is_null()).map(material);
    certificate
}

fn material(value: &Value) -> CertificateMaterial {
    match value {
        Value::Object(inner) if inner.contains_key("data") && !is_buffer(inner) => {
            CertificateMaterial {
                data: inner.get("data").and_then(binary_text).unwrap_or_default(),
                passphrase: text(inner, &["passphrase"]),
            }
        },
        other => CertificateMaterial {
            data: binary_text(other).unwrap_or_default(),
            passphrase: None,
        },
    }
}

fn is_buffer(obj: &Object) -> bool {
    obj.get("type").and_then(Value::as_str) == Some("Buffer")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Object {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_request_aliases_and_defaults() {
        let r = request(
            &obj(json!({
                "key": "r1",
                "_rev": "3-abc",
                "url": "https://api",
                "body": {"a": 1},
                "time": 5,
                "projects": ["p1", "p1", "p2"]
            })),
            RequestType::History,
        );
        assert_eq!(r.meta.id.as_deref(), Some("r1"));
        assert!(r.meta.rev.is_none());
        assert_eq!(r.meta.created, Some(5));
        assert_eq!(r.method, "GET");
        assert_eq!(r.payload, r#"{"a":1}"#);
        assert_eq!(r.request_type, RequestType::History);
        assert_eq!(r.projects, vec!["p1", "p2"]);
    }

    #[test]
    fn test_project_keeps_orphan_ids() {
        let p = project(&obj(json!({"_id": "p", "requests": ["missing", {"url": "x"}]})));
        assert_eq!(p.name, "Unnamed project");
        assert_eq!(p.requests, vec!["missing"]);
    }

    #[test]
    fn test_variable_key_is_name() {
        let v = variable(&obj(json!({"key": "host", "value": "x", "disabled": true})));
        assert_eq!(v.name, "host");
        assert!(v.meta.id.is_none());
        assert!(!v.enabled);
        assert_eq!(v.environment, DEFAULT_ENVIRONMENT);
    }

    #[test]
    fn test_cookie_session_follows_expiry() {
        let c = cookie(&obj(json!({"name": "s", "domain": "a", "expires": 10})));
        assert!(!c.session);
        assert_eq!(c.path, "/");
        let c = cookie(&obj(json!({"name": "s", "domain": "a", "httpOnly": true})));
        assert!(c.session);
        assert!(c.http_only);
    }

    #[test]
    fn test_certificate_material_forms() {
        let c = certificate(&obj(json!({
            "_id": "c1",
            "type": "PEM",
            "cert": {"data": "-----BEGIN", "passphrase": "pw"},
            "key": {"type": "Buffer", "data": [1, 2]}
        })));
        assert_eq!(c.cert_type, CertificateType::Pem);
        assert_eq!(c.cert.data, "-----BEGIN");
        assert_eq!(c.cert.passphrase.as_deref(), Some("pw"));
        assert_eq!(c.key.unwrap().data, "AQI=");
    }

    #[test]
    fn test_url_history_count() {
        let h = url_history(&obj(json!({"_id": "https://a", "cnt": 4})));
        assert_eq!(h.url, "https://a");
        assert_eq!(h.cnt, 4);
    }
}
