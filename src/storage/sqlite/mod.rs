//! `SQLite` document store.
//!
//! - [`connection`]: mutex handling and connection pragmas
//! - [`store`]: the [`SqliteStore`] backend

mod connection;
mod store;

pub use connection::{BUSY_TIMEOUT_MS, acquire_lock, configure_connection};
pub use store::SqliteStore;
