//! Export import pipeline.
//!
//! Turns the raw export of a REST client into canonical entities and merges
//! them into a document store.
//!
//! # Pipeline
//!
//! - **Detection** picks the export format from structural signatures
//! - **Normalization** maps the format onto [`CanonicalExport`]
//! - **Identity resolution** fills missing ids and relinks projects with
//!   their requests
//! - **Merge** writes every kind with last-import-wins revisions
//!
//! # Supported Formats
//!
//! | Format | Signature | Notes |
//! |--------|-----------|-------|
//! | `postman-v2` | `info.schema` names collection v2 | Folders flattened depth first |
//! | `postman-v1` | `id`, `name`, `requests`, `order` | Folder order respected |
//! | `postman-environment` | `values` + `name`, no requests | Values bound by environment name |
//! | `single-request` | string `url` and `method` | One saved request |
//! | `document-store` | `kind` starting with `ARC#` | Every kind supported |
//! | `legacy-document` | `requests` is an object | Requests linked by project number |
//! | `legacy-objects` | `projects` with embedded `requests` | Requests owned by projects |
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use restvault::import::{ImportService, normalize_str};
//! use restvault::storage::SqliteStore;
//!
//! let export = normalize_str(&std::fs::read_to_string("collection.json")?)?;
//! let store = Arc::new(SqliteStore::new("restvault.db")?);
//! let report = ImportService::new(store).import_data(&export)?;
//! if let Some(failures) = report.into_failures() {
//!     eprintln!("{} records skipped", failures.len());
//! }
//! ```

pub mod detect;
pub mod normalize;
pub mod resolve;
pub mod service;

use serde_json::Value;

use crate::Result;
use crate::models::CanonicalExport;

pub use detect::{ExportFormat, detect, parse_blob};
pub use normalize::{NormalizedExport, ProjectLink, normalize_format};
pub use resolve::{IdGenerator, IdentityResolver};
pub use service::{IMPORT_ORDER, ImportFailure, ImportOptions, ImportReport, ImportService};

/// Detects, normalizes, and resolves identities of a parsed export.
///
/// # Errors
///
/// Returns [`crate::Error::UnrecognizedFormat`] if no known format matches.
pub fn normalize(data: &Value) -> Result<CanonicalExport> {
    let format = detect(data)?;
    let normalized = normalize_format(format, data);
    Ok(IdentityResolver::new().resolve(normalized))
}

/// Parses a raw export blob and normalizes it.
///
/// # Errors
///
/// Returns [`crate::Error::UnrecognizedFormat`] if the blob is not JSON or
/// matches no known format.
pub fn normalize_str(text: &str) -> Result<CanonicalExport> {
    normalize(&parse_blob(text)?)
}
