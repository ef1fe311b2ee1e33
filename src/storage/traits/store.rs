//! Revisioned document store trait.

use crate::models::EntityKind;
use crate::storage::{Document, ListOptions, Page};
use crate::{Error, Result};

/// Id and revision assigned by a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionStamp {
    /// Document id.
    pub id: String,
    /// New revision token.
    pub rev: String,
    /// Revision the write replaced, if the document existed.
    pub old_rev: Option<String>,
}

/// Trait for revisioned document stores.
///
/// Documents are keyed by kind and `_id`. Every write mints a new `_rev`;
/// a write to an existing document must carry its current `_rev`, otherwise
/// it fails with [`Error::RevisionConflict`]. Callers never invent revisions,
/// they only forward ones they have read.
pub trait DocumentStore: Send + Sync {
    /// Short backend name used in logs and metrics.
    fn backend_name(&self) -> &'static str;

    /// Retrieves a document.
    ///
    /// When `rev` is given and differs from the current revision, returns
    /// `None`.
    fn get(&self, kind: EntityKind, id: &str, rev: Option<&str>) -> Result<Option<Document>>;

    /// Creates or updates a document.
    ///
    /// Creation requires the document to carry no `_rev`; updates require the
    /// current `_rev`.
    fn put(&self, kind: EntityKind, document: Document) -> Result<RevisionStamp>;

    /// Writes several documents of one kind.
    ///
    /// Each record succeeds or fails independently. Only a failure of the
    /// store itself ([`Error::StoreUnavailable`]) fails the whole call.
    fn bulk_put(
        &self,
        kind: EntityKind,
        documents: Vec<Document>,
    ) -> Result<Vec<Result<RevisionStamp>>> {
        let mut results = Vec::with_capacity(documents.len());
        for document in documents {
            match self.put(kind, document) {
                Err(Error::StoreUnavailable(cause)) => return Err(Error::StoreUnavailable(cause)),
                other => results.push(other),
            }
        }
        Ok(results)
    }

    /// Lists documents of a kind in natural order.
    fn list(&self, kind: EntityKind, options: &ListOptions) -> Result<Page>;

    /// Deletes a document.
    ///
    /// Returns `false` when the document does not exist.
    fn delete(&self, kind: EntityKind, id: &str, rev: Option<&str>) -> Result<bool>;

    /// Returns the number of documents of a kind.
    fn count(&self, kind: EntityKind) -> Result<usize>;
}
