//! Data models for restvault.
//!
//! The canonical model every export format is normalized into.

mod auth_data;
mod certificate;
mod cookie;
mod entity;
mod environment;
mod events;
mod export;
mod host_rule;
mod kind;
mod project;
mod request;
mod url_history;

pub use auth_data::AuthData;
pub use certificate::{
    CertificateMaterial, CertificateType, ClientCertificate, ClientCertificateData,
    ClientCertificateIndex,
};
pub use cookie::Cookie;
pub use entity::{Entity, EntityMeta};
pub use environment::{DEFAULT_ENVIRONMENT, Environment, Variable};
pub use events::{ChangeEvent, EventMeta};
pub use export::CanonicalExport;
pub use host_rule::HostRule;
pub use kind::{EntityKind, SortKey};
pub use project::Project;
pub use request::{Request, RequestType};
pub use url_history::UrlHistory;
