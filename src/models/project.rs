//! Projects group saved requests.

use serde::{Deserialize, Serialize};

use super::entity::{EntityMeta, impl_entity, require};

fn default_project_name() -> String {
    "Unnamed project".to_string()
}

/// A project with an ordered set of request ids.
///
/// The referenced requests are not required to exist; orphan ids are kept
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Identity and revision metadata.
    #[serde(flatten)]
    pub meta: EntityMeta,
    /// Display name.
    #[serde(default = "default_project_name")]
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Position among projects.
    #[serde(default)]
    pub order: i64,
    /// Ids of the requests owned by the project, in display order.
    #[serde(default)]
    pub requests: Vec<String>,
}

impl Project {
    /// Creates a project with a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: EntityMeta::default(),
            name: name.into(),
            description: String::new(),
            order: 0,
            requests: Vec::new(),
        }
    }

    /// Sets the id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.meta.id = Some(id.into());
        self
    }

    /// Appends a request id unless it is already present.
    ///
    /// Returns `true` when the id was added.
    pub fn add_request(&mut self, request_id: &str) -> bool {
        if self.requests.iter().any(|id| id == request_id) {
            return false;
        }
        self.requests.push(request_id.to_string());
        true
    }
}

fn validate_project(project: &Project) -> std::result::Result<(), String> {
    require("name", &project.name)
}

impl_entity!(Project, validate_project);
