//! Legacy exports from the in-browser database era.
//!
//! Two shapes exist. The single-document shape keeps each collection as a
//! mapping keyed by numeric index; the multi-object shape uses arrays. Both
//! link requests to projects the same two ways: a numeric `project` field on
//! a top-level request matching the project's numeric `id`, and full request
//! objects embedded in a project's `requests` list.

use std::collections::HashMap;

use serde_json::Value;

use super::fields::{records, text};
use super::{NormalizedExport, ProjectLink, records as map};
use crate::models::{CanonicalExport, RequestType};

/// Normalizes the single-document shape.
#[must_use]
pub fn normalize_document(data: &Value) -> NormalizedExport {
    normalize_legacy(data)
}

/// Normalizes the multi-object shape.
#[must_use]
pub fn normalize_objects(data: &Value) -> NormalizedExport {
    normalize_legacy(data)
}

fn normalize_legacy(data: &Value) -> NormalizedExport {
    let mut normalized = NormalizedExport::default();
    let legacy_projects = push_projects(&mut normalized, data);

    for obj in records(data.get("requests"), "requests") {
        let project = text(obj, &["project"]).and_then(|id| legacy_projects.get(&id).copied());
        if let Some(project) = project {
            normalized
                .links
                .push(ProjectLink::saved(project, normalized.export.requests.len()));
        }
        normalized
            .export
            .requests
            .push(map::request(obj, RequestType::Saved));
    }

    push_history(&mut normalized.export, data);
    normalized
}

/// Pushes every project, relocating embedded request objects into separate
/// linked requests. Returns the legacy numeric id of each project mapped to
/// its index.
fn push_projects(normalized: &mut NormalizedExport, data: &Value) -> HashMap<String, usize> {
    let export = &mut normalized.export;
    let mut legacy_projects = HashMap::new();

    for obj in records(data.get("projects"), "projects") {
        let project_index = export.projects.len();
        if let Some(legacy_id) = text(obj, &["id"]) {
            legacy_projects.insert(legacy_id, project_index);
        }
        export.projects.push(map::project(obj));

        if let Some(Value::Array(embedded)) = obj.get("requests") {
            for request in embedded.iter().filter_map(Value::as_object) {
                normalized
                    .links
                    .push(ProjectLink::saved(project_index, export.requests.len()));
                export
                    .requests
                    .push(map::request(request, RequestType::Saved));
            }
        }
    }

    legacy_projects
}

fn push_history(export: &mut CanonicalExport, data: &Value) {
    for obj in records(data.get("history"), "history") {
        export.history.push(map::request(obj, RequestType::History));
    }
}
