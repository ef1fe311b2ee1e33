//! In-memory document store.
//!
//! Used by tests and dry runs. Behaves like the `SQLite` backend, including
//! revision checks and listing order.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use tracing::instrument;

use super::cursor::paginate;
use super::metrics::record_operation_metrics;
use super::revision::stamp_write;
use super::{Document, DocumentStore, ListOptions, Page, RevisionStamp};
use crate::models::EntityKind;
use crate::{Error, Result};

type Collections = HashMap<EntityKind, BTreeMap<String, Document>>;

/// Document store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Collections> {
        self.collections.read().unwrap_or_else(|poisoned| {
            tracing::warn!("memory store lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.collections.write().unwrap_or_else(|poisoned| {
            tracing::warn!("memory store lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn finish<T>(operation: &'static str, start: Instant, result: Result<T>) -> Result<T> {
        let status = if result.is_ok() { "success" } else { "error" };
        record_operation_metrics("memory", operation, start, status);
        result
    }
}

impl DocumentStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    #[instrument(skip(self), fields(operation = "get", backend = "memory", kind = %kind))]
    fn get(&self, kind: EntityKind, id: &str, rev: Option<&str>) -> Result<Option<Document>> {
        let start = Instant::now();
        let found = self
            .read()
            .get(&kind)
            .and_then(|docs| docs.get(id))
            .filter(|doc| rev.is_none_or(|wanted| doc.rev() == Some(wanted)))
            .cloned();
        Self::finish("get", start, Ok(found))
    }

    #[instrument(skip(self, document), fields(operation = "put", backend = "memory", kind = %kind))]
    fn put(&self, kind: EntityKind, document: Document) -> Result<RevisionStamp> {
        let start = Instant::now();
        let result = (|| {
            let mut collections = self.write();
            let docs = collections.entry(kind).or_default();
            let current = document
                .id()
                .and_then(|id| docs.get(id))
                .and_then(Document::rev)
                .map(str::to_string);
            let (stored, stamp) = stamp_write(kind, current.as_deref(), document)?;
            docs.insert(stamp.id.clone(), stored);
            Ok(stamp)
        })();
        Self::finish("put", start, result)
    }

    #[instrument(skip(self, options), fields(operation = "list", backend = "memory", kind = %kind))]
    fn list(&self, kind: EntityKind, options: &ListOptions) -> Result<Page> {
        let start = Instant::now();
        let documents: Vec<Document> = self
            .read()
            .get(&kind)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default();
        Self::finish("list", start, paginate(kind, documents, options))
    }

    #[instrument(skip(self), fields(operation = "delete", backend = "memory", kind = %kind))]
    fn delete(&self, kind: EntityKind, id: &str, rev: Option<&str>) -> Result<bool> {
        let start = Instant::now();
        let result = (|| {
            let mut collections = self.write();
            let Some(docs) = collections.get_mut(&kind) else {
                return Ok(false);
            };
            let Some(existing) = docs.get(id) else {
                return Ok(false);
            };
            if let Some(wanted) = rev {
                if existing.rev() != Some(wanted) {
                    return Err(Error::RevisionConflict {
                        kind: kind.to_string(),
                        id: id.to_string(),
                    });
                }
            }
            docs.remove(id);
            Ok(true)
        })();
        Self::finish("delete", start, result)
    }

    fn count(&self, kind: EntityKind) -> Result<usize> {
        Ok(self.read().get(&kind).map_or(0, BTreeMap::len))
    }
}
