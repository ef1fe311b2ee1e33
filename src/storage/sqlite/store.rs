//! `SQLite`-backed document store.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use rusqlite::{Connection, OptionalExtension, params};
use tracing::instrument;

use super::connection::{acquire_lock, configure_connection, open, query_error};
use crate::current_timestamp_millis;
use crate::models::EntityKind;
use crate::storage::cursor::paginate;
use crate::storage::metrics::record_operation_metrics;
use crate::storage::revision::{Revision, stamp_write};
use crate::storage::{Document, DocumentStore, ListOptions, Page, RevisionStamp};
use crate::{Error, Result};

const BACKEND: &str = "sqlite";

/// Document store persisted in a single `SQLite` database.
///
/// # Schema
///
/// One `documents` table keyed by `(kind, id)`. The body column holds the
/// full JSON document including `_rev`; `rev` and `generation` are kept in
/// columns so revision checks do not parse the body.
///
/// # Concurrency Model
///
/// A `Mutex<Connection>` serializes access. Writes run inside
/// `BEGIN IMMEDIATE` so a revision check and the write that depends on it
/// cannot interleave with another writer on the same file.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl SqliteStore {
    /// Opens (or creates) a store at `db_path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnavailable`] if the database cannot be opened
    /// or its schema cannot be created.
    pub fn new(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        let conn = open(&db_path)?;
        let store = Self {
            conn: Mutex::new(conn),
            db_path: Some(db_path),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Creates a store backed by an in-memory database.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnavailable`] if the database cannot be created.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::StoreUnavailable(format!("open in-memory database: {e}")))?;
        let store = Self {
            conn: Mutex::new(conn),
            db_path: None,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Returns the database path (`None` for in-memory).
    #[must_use]
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn initialize(&self) -> Result<()> {
        let conn = acquire_lock(&self.conn);
        configure_connection(&conn)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS documents (
                kind TEXT NOT NULL,
                id TEXT NOT NULL,
                rev TEXT NOT NULL,
                generation INTEGER NOT NULL,
                body TEXT NOT NULL,
                updated INTEGER NOT NULL,
                PRIMARY KEY (kind, id)
            );
            CREATE INDEX IF NOT EXISTS idx_documents_kind_updated
                ON documents(kind, updated DESC);",
        )
        .map_err(|e| Error::StoreUnavailable(format!("create documents table: {e}")))
    }

    fn current_rev(conn: &Connection, kind: EntityKind, id: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT rev FROM documents WHERE kind = ?1 AND id = ?2",
            params![kind.as_str(), id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| query_error("select_revision", &e))
    }

    /// Checks and writes one document inside an open transaction.
    ///
    /// The outer `Result` is a statement failure that aborts the transaction;
    /// the inner one is the per-record outcome.
    fn write_one(
        conn: &Connection,
        kind: EntityKind,
        document: Document,
    ) -> Result<Result<RevisionStamp>> {
        let current = match document.id() {
            Some(id) => Self::current_rev(conn, kind, id)?,
            None => None,
        };
        let (stored, stamp) = match stamp_write(kind, current.as_deref(), document) {
            Ok(stamped) => stamped,
            Err(e) => return Ok(Err(e)),
        };

        let generation = Revision::parse(&stamp.rev).map_or(1, |rev| rev.generation);
        let generation = i64::try_from(generation).unwrap_or(i64::MAX);
        let body = serde_json::to_string(&stored).map_err(|e| Error::OperationFailed {
            operation: "serialize_document".to_string(),
            cause: e.to_string(),
        })?;

        conn.execute(
            "INSERT INTO documents (kind, id, rev, generation, body, updated)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(kind, id) DO UPDATE SET
                rev = excluded.rev,
                generation = excluded.generation,
                body = excluded.body,
                updated = excluded.updated",
            params![
                kind.as_str(),
                stamp.id,
                stamp.rev,
                generation,
                body,
                current_timestamp_millis()
            ],
        )
        .map_err(|e| query_error("upsert_document", &e))?;

        Ok(Ok(stamp))
    }

    /// Runs `f` inside `BEGIN IMMEDIATE`, committing on success.
    fn in_transaction<T>(conn: &Connection, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        conn.execute("BEGIN IMMEDIATE", [])
            .map_err(|e| Error::StoreUnavailable(format!("begin transaction: {e}")))?;

        let result = f(conn);
        if result.is_ok() {
            conn.execute("COMMIT", [])
                .map_err(|e| Error::StoreUnavailable(format!("commit transaction: {e}")))?;
        } else if let Err(e) = conn.execute("ROLLBACK", []) {
            tracing::warn!(error = %e, "failed to roll back transaction");
        }
        result
    }

    fn decode_body(body: &str) -> Result<Document> {
        serde_json::from_str(body).map_err(|e| Error::OperationFailed {
            operation: "decode_document".to_string(),
            cause: e.to_string(),
        })
    }
}

impl DocumentStore for SqliteStore {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    #[instrument(skip(self), fields(operation = "get", backend = BACKEND, kind = %kind))]
    fn get(&self, kind: EntityKind, id: &str, rev: Option<&str>) -> Result<Option<Document>> {
        let start = Instant::now();
        let result = (|| {
            let conn = acquire_lock(&self.conn);
            let row: Option<(String, String)> = conn
                .query_row(
                    "SELECT rev, body FROM documents WHERE kind = ?1 AND id = ?2",
                    params![kind.as_str(), id],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()
                .map_err(|e| query_error("get_document", &e))?;

            match row {
                Some((stored_rev, body)) if rev.is_none_or(|wanted| wanted == stored_rev) => {
                    Self::decode_body(&body).map(Some)
                },
                _ => Ok(None),
            }
        })();

        let status = if result.is_ok() { "success" } else { "error" };
        record_operation_metrics(BACKEND, "get", start, status);
        result
    }

    #[instrument(skip(self, document), fields(operation = "put", backend = BACKEND, kind = %kind))]
    fn put(&self, kind: EntityKind, document: Document) -> Result<RevisionStamp> {
        let start = Instant::now();
        let result = (|| {
            let conn = acquire_lock(&self.conn);
            Self::in_transaction(&conn, |conn| Self::write_one(conn, kind, document))?
        })();

        let status = if result.is_ok() { "success" } else { "error" };
        record_operation_metrics(BACKEND, "put", start, status);
        result
    }

    /// Writes all documents in one transaction.
    ///
    /// Revision and id problems are reported per record and do not abort the
    /// batch; a failing statement rolls the whole batch back.
    #[instrument(skip(self, documents), fields(operation = "bulk_put", backend = BACKEND, kind = %kind, count = documents.len()))]
    fn bulk_put(
        &self,
        kind: EntityKind,
        documents: Vec<Document>,
    ) -> Result<Vec<Result<RevisionStamp>>> {
        let start = Instant::now();
        let result = (|| {
            let conn = acquire_lock(&self.conn);
            Self::in_transaction(&conn, |conn| {
                documents
                    .into_iter()
                    .map(|document| Self::write_one(conn, kind, document))
                    .collect::<Result<Vec<_>>>()
            })
            .map_err(|e| match e {
                Error::StoreUnavailable(_) => e,
                other => Error::StoreUnavailable(other.to_string()),
            })
        })();

        let status = if result.is_ok() { "success" } else { "error" };
        record_operation_metrics(BACKEND, "bulk_put", start, status);
        result
    }

    #[instrument(skip(self, options), fields(operation = "list", backend = BACKEND, kind = %kind))]
    fn list(&self, kind: EntityKind, options: &ListOptions) -> Result<Page> {
        let start = Instant::now();
        let result = (|| {
            let conn = acquire_lock(&self.conn);
            let mut stmt = conn
                .prepare("SELECT body FROM documents WHERE kind = ?1")
                .map_err(|e| query_error("prepare_list", &e))?;
            let bodies = stmt
                .query_map(params![kind.as_str()], |row| row.get::<_, String>(0))
                .map_err(|e| query_error("list_documents", &e))?;

            let mut documents = Vec::new();
            for body in bodies {
                let body = body.map_err(|e| query_error("read_row", &e))?;
                documents.push(Self::decode_body(&body)?);
            }
            paginate(kind, documents, options)
        })();

        let status = if result.is_ok() { "success" } else { "error" };
        record_operation_metrics(BACKEND, "list", start, status);
        result
    }

    #[instrument(skip(self), fields(operation = "delete", backend = BACKEND, kind = %kind))]
    fn delete(&self, kind: EntityKind, id: &str, rev: Option<&str>) -> Result<bool> {
        let start = Instant::now();
        let result = (|| {
            let conn = acquire_lock(&self.conn);
            Self::in_transaction(&conn, |conn| {
                let Some(current) = Self::current_rev(conn, kind, id)? else {
                    return Ok(false);
                };
                if rev.is_some_and(|wanted| wanted != current) {
                    return Err(Error::RevisionConflict {
                        kind: kind.to_string(),
                        id: id.to_string(),
                    });
                }
                conn.execute(
                    "DELETE FROM documents WHERE kind = ?1 AND id = ?2",
                    params![kind.as_str(), id],
                )
                .map_err(|e| query_error("delete_document", &e))?;
                Ok(true)
            })
        })();

        let status = if result.is_ok() { "success" } else { "error" };
        record_operation_metrics(BACKEND, "delete", start, status);
        result
    }

    fn count(&self, kind: EntityKind) -> Result<usize> {
        let conn = acquire_lock(&self.conn);
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM documents WHERE kind = ?1",
                params![kind.as_str()],
                |row| row.get(0),
            )
            .map_err(|e| query_error("count_documents", &e))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}
