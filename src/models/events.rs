//! Change notifications emitted for store writes.

use serde_json::Value;
use uuid::Uuid;

use super::EntityKind;
use crate::current_timestamp_millis;

/// Shared event metadata required for observability.
#[derive(Debug, Clone)]
pub struct EventMeta {
    /// Unique identifier for this event.
    pub event_id: String,
    /// Optional correlation identifier (one per import call).
    pub correlation_id: Option<String>,
    /// Event source component.
    pub source: &'static str,
    /// Timestamp (epoch milliseconds).
    pub timestamp: i64,
}

impl EventMeta {
    /// Creates new event metadata using the current timestamp.
    #[must_use]
    pub fn new(source: &'static str, correlation_id: Option<String>) -> Self {
        Self::with_timestamp(source, correlation_id, current_timestamp_millis())
    }

    /// Creates new event metadata with a specified timestamp.
    #[must_use]
    pub fn with_timestamp(
        source: &'static str,
        correlation_id: Option<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            correlation_id,
            source,
            timestamp,
        }
    }
}

/// A document was written to the store.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    /// Event metadata.
    pub meta: EventMeta,
    /// Kind of the written document.
    pub kind: EntityKind,
    /// Document id.
    pub id: String,
    /// Revision assigned by the store.
    pub rev: String,
    /// The document as written.
    pub item: Value,
    /// Revision replaced by this write, if the document existed.
    pub old_rev: Option<String>,
}

impl ChangeEvent {
    /// Returns whether the write created the document.
    #[must_use]
    pub const fn is_create(&self) -> bool {
        self.old_rev.is_none()
    }
}
