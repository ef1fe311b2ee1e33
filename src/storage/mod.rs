//! Revisioned document storage.
//!
//! Stores hold untyped [`Document`]s keyed by entity kind and `_id`, mint a
//! new `_rev` on every write, and reject writes that do not carry the
//! current revision. Two backends are provided:
//! - [`MemoryStore`]: process memory, for tests and dry runs
//! - [`SqliteStore`]: a single `SQLite` file

// Dropping the connection guard a few statements early buys nothing here.
#![allow(clippy::significant_drop_tightening)]

pub mod cursor;
mod document;
pub mod memory;
pub mod metrics;
pub mod revision;
pub mod sqlite;
pub mod traits;

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use cursor::{DEFAULT_PAGE_SIZE, ListOptions, MAX_PAGE_SIZE, Page, PageToken};
pub use document::{Document, ID_FIELD, REV_FIELD};
pub use memory::MemoryStore;
pub use revision::Revision;
pub use sqlite::SqliteStore;
pub use traits::{DocumentStore, RevisionStamp};

use crate::{Error, Result};

/// Available store backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process memory; nothing survives the process.
    Memory,
    /// `SQLite` database file.
    #[default]
    Sqlite,
}

impl StoreBackend {
    /// Returns the backend name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            other => Err(Error::InvalidInput(format!(
                "unknown store backend '{other}' (expected memory or sqlite)"
            ))),
        }
    }
}

/// Opens a store for the given backend.
///
/// `sqlite_path` is ignored for the memory backend.
///
/// # Errors
///
/// Returns [`Error::StoreUnavailable`] if the `SQLite` database cannot be
/// opened.
pub fn open_store(backend: StoreBackend, sqlite_path: &Path) -> Result<Arc<dyn DocumentStore>> {
    tracing::debug!(backend = %backend, path = %sqlite_path.display(), "opening document store");
    match backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreBackend::Sqlite => Ok(Arc::new(SqliteStore::new(sqlite_path)?)),
    }
}
