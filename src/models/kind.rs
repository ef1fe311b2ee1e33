//! Entity kinds and their store names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The kinds of documents held by the store.
///
/// Saved and history requests share the [`super::Request`] type but live in
/// separate kinds so their id spaces never collide. Client certificates are
/// split into an index kind and a payload kind linked 1:1 by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    /// Saved requests.
    Request,
    /// History requests.
    History,
    /// Projects.
    Project,
    /// Environments.
    Environment,
    /// Variables.
    Variable,
    /// Cookies.
    Cookie,
    /// HTTP URL history.
    UrlHistory,
    /// Websocket URL history.
    WebsocketUrlHistory,
    /// Cached authentication data.
    AuthData,
    /// Host rewrite rules.
    HostRule,
    /// Client certificate index records.
    ClientCertificate,
    /// Client certificate payload records.
    ClientCertificateData,
}

/// How listings of a kind are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Ordered by document id.
    Id,
    /// Ordered by a numeric time field (`time`, falling back to `created`).
    Time,
    /// Ordered by the `order` field, then by name.
    Order,
}

impl EntityKind {
    /// Returns all kinds.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Request,
            Self::History,
            Self::Project,
            Self::Environment,
            Self::Variable,
            Self::Cookie,
            Self::UrlHistory,
            Self::WebsocketUrlHistory,
            Self::AuthData,
            Self::HostRule,
            Self::ClientCertificate,
            Self::ClientCertificateData,
        ]
    }

    /// Returns the store name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "requests",
            Self::History => "history",
            Self::Project => "projects",
            Self::Environment => "environments",
            Self::Variable => "variables",
            Self::Cookie => "cookies",
            Self::UrlHistory => "url-history",
            Self::WebsocketUrlHistory => "websocket-url-history",
            Self::AuthData => "auth-data",
            Self::HostRule => "host-rules",
            Self::ClientCertificate => "client-certificates",
            Self::ClientCertificateData => "client-certificates-data",
        }
    }

    /// Parses a kind name.
    ///
    /// Accepts store names, canonical export keys, and a few legacy aliases.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "requests" | "request" | "saved" => Some(Self::Request),
            "history" => Some(Self::History),
            "projects" | "project" | "legacy-projects" => Some(Self::Project),
            "environments" | "environment" => Some(Self::Environment),
            "variables" | "variable" => Some(Self::Variable),
            "cookies" | "cookie" => Some(Self::Cookie),
            "url-history" | "urlhistory" => Some(Self::UrlHistory),
            "websocket-url-history" | "websocketurlhistory" => Some(Self::WebsocketUrlHistory),
            "auth-data" | "authdata" => Some(Self::AuthData),
            "host-rules" | "hostrules" => Some(Self::HostRule),
            "client-certificates" | "clientcertificates" => Some(Self::ClientCertificate),
            "client-certificates-data" => Some(Self::ClientCertificateData),
            _ => None,
        }
    }

    /// Returns the natural listing order of the kind.
    #[must_use]
    pub const fn sort_key(&self) -> SortKey {
        match self {
            Self::History | Self::UrlHistory | Self::WebsocketUrlHistory => SortKey::Time,
            Self::Project => SortKey::Order,
            _ => SortKey::Id,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::parse(s).ok_or_else(|| Error::InvalidInput(format!("Unknown entity kind: {s}")))
    }
}
