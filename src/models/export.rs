//! The canonical export object.

use serde::{Deserialize, Serialize};

use super::{
    AuthData, ClientCertificate, Cookie, EntityKind, Environment, HostRule, Project, Request,
    UrlHistory, Variable,
};

/// Format-independent representation every normalizer converges to.
///
/// Each field is an ordered sequence of records of one kind. Missing keys
/// deserialize to empty sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanonicalExport {
    /// Saved requests.
    pub requests: Vec<Request>,
    /// History requests.
    pub history: Vec<Request>,
    /// Projects.
    pub projects: Vec<Project>,
    /// Variables.
    pub variables: Vec<Variable>,
    /// Environments.
    pub environments: Vec<Environment>,
    /// Cookies.
    pub cookies: Vec<Cookie>,
    /// HTTP URL history.
    pub url_history: Vec<UrlHistory>,
    /// Websocket URL history.
    pub websocket_url_history: Vec<UrlHistory>,
    /// Cached authentication data.
    pub auth_data: Vec<AuthData>,
    /// Host rewrite rules.
    pub host_rules: Vec<HostRule>,
    /// Client certificates with inline payload.
    pub client_certificates: Vec<ClientCertificate>,
}

impl CanonicalExport {
    /// Creates an empty export.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records of a kind.
    ///
    /// Certificate payload records mirror the index records one to one.
    #[must_use]
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Request => self.requests.len(),
            EntityKind::History => self.history.len(),
            EntityKind::Project => self.projects.len(),
            EntityKind::Variable => self.variables.len(),
            EntityKind::Environment => self.environments.len(),
            EntityKind::Cookie => self.cookies.len(),
            EntityKind::UrlHistory => self.url_history.len(),
            EntityKind::WebsocketUrlHistory => self.websocket_url_history.len(),
            EntityKind::AuthData => self.auth_data.len(),
            EntityKind::HostRule => self.host_rules.len(),
            EntityKind::ClientCertificate | EntityKind::ClientCertificateData => {
                self.client_certificates.len()
            },
        }
    }

    /// Returns the number of records across all kinds.
    ///
    /// Each client certificate counts once.
    #[must_use]
    pub fn total_records(&self) -> usize {
        EntityKind::all()
            .iter()
            .filter(|kind| **kind != EntityKind::ClientCertificateData)
            .map(|kind| self.count(*kind))
            .sum()
    }

    /// Returns whether the export holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_records() == 0
    }
}
