//! Connection handling for the `SQLite` store.

use crate::{Error, Result};
use rusqlite::{Connection, ErrorCode};
use std::sync::{Mutex, MutexGuard};

/// Milliseconds a statement waits on a locked database before failing.
pub const BUSY_TIMEOUT_MS: u32 = 5000;

/// Acquires the connection mutex, recovering from poison.
///
/// A panic inside a previous critical section leaves the connection usable,
/// so the guard is recovered and the event is logged and counted.
pub fn acquire_lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("SQLite mutex was poisoned, recovering");
            metrics::counter!("sqlite_mutex_poison_recovery_total").increment(1);
            poisoned.into_inner()
        },
    }
}

/// Applies connection pragmas.
///
/// - **WAL mode**: concurrent readers with a single writer
/// - **NORMAL synchronous**: balances durability with throughput
/// - **`busy_timeout`**: waits for locks instead of failing with `SQLITE_BUSY`
///
/// # Errors
///
/// Returns [`Error::StoreUnavailable`] if the busy timeout cannot be set,
/// which means the database file is not usable.
pub fn configure_connection(conn: &Connection) -> Result<()> {
    // in-memory databases report "memory" and keep working
    let journal_mode =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0));
    match journal_mode {
        Ok(mode) if mode.eq_ignore_ascii_case("wal") => {},
        Ok(mode) => tracing::debug!(mode = %mode, "WAL journal mode not available"),
        Err(e) => tracing::warn!(error = %e, "failed to set journal_mode"),
    }
    if let Err(e) = conn.pragma_update(None, "synchronous", "NORMAL") {
        tracing::warn!(error = %e, "failed to set synchronous mode");
    }
    conn.pragma_update(None, "busy_timeout", BUSY_TIMEOUT_MS)
        .map_err(|e| Error::StoreUnavailable(format!("configure connection: {e}")))?;
    Ok(())
}

/// Maps a statement failure to a crate error.
///
/// Failures of the database file itself (unopenable, locked, corrupt, I/O)
/// become [`Error::StoreUnavailable`]; anything else is
/// [`Error::OperationFailed`] for the named operation.
pub fn query_error(operation: &str, err: &rusqlite::Error) -> Error {
    let unavailable = matches!(
        err.sqlite_error_code(),
        Some(
            ErrorCode::CannotOpen
                | ErrorCode::SystemIoFailure
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::NotADatabase
                | ErrorCode::DatabaseCorrupt
                | ErrorCode::DiskFull
        )
    );
    if unavailable {
        Error::StoreUnavailable(format!("{operation}: {err}"))
    } else {
        Error::OperationFailed {
            operation: operation.to_string(),
            cause: err.to_string(),
        }
    }
}

/// Opens a database file, mapping failures to [`Error::StoreUnavailable`].
///
/// # Errors
///
/// Returns [`Error::StoreUnavailable`] if the file cannot be opened.
pub fn open(path: &std::path::Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::StoreUnavailable(format!("create {}: {e}", parent.display()))
        })?;
    }
    Connection::open(path)
        .map_err(|e| Error::StoreUnavailable(format!("open {}: {e}", path.display())))
}
