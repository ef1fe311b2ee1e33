//! Identity resolution.
//!
//! Fills in missing ids and turns the positional project links produced by
//! normalizers into id references on both sides of the relationship.

use crate::models::{CanonicalExport, Entity, RequestType};

use super::normalize::NormalizedExport;

/// Produces ids for entities that have none.
pub type IdGenerator = fn() -> String;

fn random_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Assigns ids and links requests to projects.
#[derive(Debug, Clone, Copy)]
pub struct IdentityResolver {
    generate: IdGenerator,
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self {
            generate: random_id,
        }
    }
}

impl IdentityResolver {
    /// Creates a resolver minting random UUIDs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver using a custom id generator.
    #[must_use]
    pub const fn with_generator(generate: IdGenerator) -> Self {
        Self { generate }
    }

    /// Resolves identities and relationships.
    ///
    /// Every entity with an absent or blank id gets a fresh one. For each
    /// link, the request id is appended to the project's `requests` and the
    /// project id to the request's `projects`, both without duplicates.
    /// Existing references, including ones to entities that do not exist,
    /// are left untouched.
    #[must_use]
    pub fn resolve(&self, normalized: NormalizedExport) -> CanonicalExport {
        let NormalizedExport { mut export, links } = normalized;
        self.assign_ids(&mut export);

        for link in links {
            let Some(project) = export.projects.get_mut(link.project) else {
                tracing::warn!(project = link.project, "link points past the last project");
                continue;
            };
            let requests = match link.request_type {
                RequestType::Saved => &mut export.requests,
                RequestType::History => &mut export.history,
            };
            let Some(request) = requests.get_mut(link.request) else {
                tracing::warn!(request = link.request, "link points past the last request");
                continue;
            };

            let (Some(project_id), Some(request_id)) = (project.meta.id(), request.meta.id())
            else {
                continue;
            };
            let (project_id, request_id) = (project_id.to_string(), request_id.to_string());
            project.add_request(&request_id);
            if !request.projects.contains(&project_id) {
                request.projects.push(project_id);
            }
        }

        export
    }

    fn assign_ids(&self, export: &mut CanonicalExport) {
        self.fill(&mut export.requests);
        self.fill(&mut export.history);
        self.fill(&mut export.projects);
        self.fill(&mut export.variables);
        self.fill(&mut export.environments);
        self.fill(&mut export.cookies);
        self.fill(&mut export.url_history);
        self.fill(&mut export.websocket_url_history);
        self.fill(&mut export.auth_data);
        self.fill(&mut export.host_rules);
        self.fill(&mut export.client_certificates);
    }

    fn fill<E: Entity>(&self, items: &mut [E]) {
        for item in items {
            let meta = item.meta_mut();
            if meta.id().is_none() {
                meta.id = Some((self.generate)());
            }
        }
    }
}
