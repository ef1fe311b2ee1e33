//! # Restvault
//!
//! Normalizes exports from REST client tools and merges them into a single
//! revisioned store of requests, projects, history, variables, environments,
//! cookies, auth data, URL histories, host rules, and client certificates.
//!
//! ## Pipeline
//!
//! - Format detection from structural signatures of the raw export
//! - One pure normalizer per known export format
//! - Identity resolution (id generation, project/request relinking)
//! - Merge into a [`DocumentStore`] with last-import-wins revisions and
//!   per-record failure isolation
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use restvault::{ImportService, MemoryStore, normalize_str};
//!
//! let export = normalize_str(&std::fs::read_to_string("arc-export.json")?)?;
//! let service = ImportService::new(Arc::new(MemoryStore::new()));
//! let report = service.import_data(&export)?;
//! println!("{} of {} records imported", report.written(), report.total());
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod config;
pub mod import;
pub mod models;
pub mod observability;
pub mod storage;

pub use config::RestvaultConfig;
pub use import::{
    ExportFormat, IdentityResolver, ImportFailure, ImportOptions, ImportReport, ImportService,
    NormalizedExport, detect, normalize, normalize_str,
};
pub use models::{CanonicalExport, EntityKind, Request, RequestType};
pub use storage::{DocumentStore, MemoryStore, SqliteStore};

/// Error type for restvault operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `UnrecognizedFormat` | No export signature matches, or the blob is not JSON |
/// | `MalformedRecord` | A single record fails validation or its write fails |
/// | `RevisionConflict` | A write to an existing document carries a stale or no `_rev` |
/// | `StoreUnavailable` | The backing store cannot be opened or reached |
/// | `InvalidInput` | Bad CLI arguments, config values, or page tokens |
/// | `OperationFailed` | I/O, serialization, or query failures |
#[derive(Debug, ThisError)]
pub enum Error {
    /// The export blob does not match any known format.
    ///
    /// Fatal for the whole import: nothing is normalized.
    #[error("unrecognized export format: {0}")]
    UnrecognizedFormat(String),

    /// A single record is structurally invalid.
    ///
    /// Raised per record and collected into the import report; never aborts
    /// a batch.
    #[error("malformed {kind} record '{id}': {message}")]
    MalformedRecord {
        /// Store name of the entity kind.
        kind: String,
        /// Record id (may be empty when the record had none).
        id: String,
        /// What is wrong with the record.
        message: String,
    },

    /// The supplied revision does not match the stored one.
    #[error("revision conflict on {kind} '{id}'")]
    RevisionConflict {
        /// Store name of the entity kind.
        kind: String,
        /// Document id.
        id: String,
    },

    /// The store cannot serve requests.
    ///
    /// Raised when:
    /// - The `SQLite` database cannot be opened or initialized
    /// - A backend lock cannot be taken
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for restvault operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns the current Unix timestamp in milliseconds.
///
/// Entity `created`/`updated` fields are millisecond timestamps.
#[must_use]
pub fn current_timestamp_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
