//! Import service.
//!
//! Merges a canonical export into a document store, one kind at a time in
//! [`IMPORT_ORDER`]. Records are validated and merged with what the store
//! already holds, then written with one bulk call per kind. Failures of
//! individual records are collected in the [`ImportReport`]; only an
//! unavailable store aborts the import.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::instrument;

use crate::models::{
    CanonicalExport, ChangeEvent, ClientCertificate, Entity, EntityKind, EventMeta, Request,
    RequestType,
};
use crate::observability::EventBus;
use crate::storage::{Document, DocumentStore, RevisionStamp};
use crate::{Error, Result, current_timestamp_millis};

/// Order in which kinds are written.
///
/// Requests come before projects so project membership lists point at
/// requests that already exist. Certificate index records are written before
/// their payload records.
pub const IMPORT_ORDER: [EntityKind; 12] = [
    EntityKind::Request,
    EntityKind::History,
    EntityKind::Project,
    EntityKind::Environment,
    EntityKind::Variable,
    EntityKind::Cookie,
    EntityKind::UrlHistory,
    EntityKind::WebsocketUrlHistory,
    EntityKind::AuthData,
    EntityKind::HostRule,
    EntityKind::ClientCertificate,
    EntityKind::ClientCertificateData,
];

const EVENT_SOURCE: &str = "import";

/// Options for an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Validate and count without reading or writing the store.
    pub dry_run: bool,
    /// Re-read and retry a write once after a revision conflict.
    pub retry_conflicts: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            retry_conflicts: true,
        }
    }
}

impl ImportOptions {
    /// Enables or disables dry run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Enables or disables the conflict retry.
    #[must_use]
    pub const fn with_retry_conflicts(mut self, retry: bool) -> Self {
        self.retry_conflicts = retry;
        self
    }
}

/// A record that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportFailure {
    /// Kind of the record.
    pub kind: EntityKind,
    /// Record id; empty when the record had none.
    pub id: String,
    /// Why the record was not imported.
    pub message: String,
}

impl fmt::Display for ImportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.id.is_empty() {
            write!(f, "{}: {}", self.kind, self.message)
        } else {
            write!(f, "{} '{}': {}", self.kind, self.id, self.message)
        }
    }
}

/// Outcome of an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Records written per kind.
    pub counts: BTreeMap<EntityKind, usize>,
    /// Records that were not written.
    pub failures: Vec<ImportFailure>,
    /// Records in the export (each certificate counted once).
    pub total_records: usize,
    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl ImportReport {
    fn new(total_records: usize, dry_run: bool) -> Self {
        Self {
            total_records,
            dry_run,
            ..Self::default()
        }
    }

    /// Returns the records written for a kind.
    #[must_use]
    pub fn count(&self, kind: EntityKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Returns the records written, counting each certificate once.
    #[must_use]
    pub fn written(&self) -> usize {
        self.counts
            .iter()
            .filter(|(kind, _)| **kind != EntityKind::ClientCertificateData)
            .map(|(_, count)| count)
            .sum()
    }

    /// Returns the records in the export.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total_records
    }

    /// Returns whether any record failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Returns the failures, or `None` when every record was imported.
    #[must_use]
    pub fn into_failures(self) -> Option<Vec<ImportFailure>> {
        if self.failures.is_empty() {
            None
        } else {
            Some(self.failures)
        }
    }

    /// Metric status for records counted by this report.
    const fn record_status(&self) -> &'static str {
        if self.dry_run { "dry_run" } else { "written" }
    }

    fn add_written(&mut self, kind: EntityKind, count: usize) {
        *self.counts.entry(kind).or_default() += count;
        metrics::counter!(
            "import_records_total",
            "kind" => kind.as_str(),
            "status" => self.record_status()
        )
        .increment(count as u64);
    }

    fn fail(&mut self, kind: EntityKind, id: impl Into<String>, message: impl Into<String>) {
        let failure = ImportFailure {
            kind,
            id: id.into(),
            message: message.into(),
        };
        tracing::warn!(kind = %kind, id = %failure.id, reason = %failure.message, "record not imported");
        metrics::counter!("import_failures_total", "kind" => kind.as_str()).increment(1);
        self.failures.push(failure);
    }
}

/// Merges canonical exports into a document store.
pub struct ImportService {
    store: Arc<dyn DocumentStore>,
    event_bus: Option<EventBus>,
    options: ImportOptions,
}

impl ImportService {
    /// Creates an import service writing to `store`.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            event_bus: None,
            options: ImportOptions::default(),
        }
    }

    /// Publishes a [`ChangeEvent`] for every write.
    #[must_use]
    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// Sets the import options.
    #[must_use]
    pub const fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the import options.
    #[must_use]
    pub const fn options(&self) -> ImportOptions {
        self.options
    }

    /// Imports every record of `export`.
    ///
    /// Per-record problems never fail the call; they are listed in the
    /// report.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnavailable`] if the store fails. Kinds written
    /// before the failure stay written.
    #[instrument(
        skip(self, export),
        fields(
            operation = "import_data",
            backend = self.store.backend_name(),
            records = export.total_records(),
            dry_run = self.options.dry_run
        )
    )]
    pub fn import_data(&self, export: &CanonicalExport) -> Result<ImportReport> {
        let start = Instant::now();
        let correlation_id = uuid::Uuid::new_v4().to_string();
        let mut report = ImportReport::new(export.total_records(), self.options.dry_run);

        let result = IMPORT_ORDER.iter().try_for_each(|&kind| {
            let documents = self.prepare_kind(kind, export, &mut report)?;
            if documents.is_empty() {
                return Ok(());
            }
            if self.options.dry_run {
                report.add_written(kind, documents.len());
                return Ok(());
            }
            self.write_kind(kind, documents, &mut report, &correlation_id)
        });

        let status = if result.is_ok() { "success" } else { "error" };
        metrics::histogram!("import_duration_ms", "status" => status)
            .record(start.elapsed().as_secs_f64() * 1000.0);
        result?;

        tracing::info!(
            written = report.written(),
            total = report.total(),
            failures = report.failures.len(),
            "import finished"
        );
        Ok(report)
    }

    /// Validates and merges the records of one kind.
    fn prepare_kind(
        &self,
        kind: EntityKind,
        export: &CanonicalExport,
        report: &mut ImportReport,
    ) -> Result<Vec<Document>> {
        let documents = match kind {
            EntityKind::Request => {
                self.prepare(kind, &export.requests, report, slot_check(RequestType::Saved))
            },
            EntityKind::History => {
                self.prepare(kind, &export.history, report, slot_check(RequestType::History))
            },
            EntityKind::Project => self.prepare(kind, &export.projects, report, accept),
            EntityKind::Environment => self.prepare(kind, &export.environments, report, accept),
            EntityKind::Variable => self.prepare(kind, &export.variables, report, accept),
            EntityKind::Cookie => self.prepare(kind, &export.cookies, report, accept),
            EntityKind::UrlHistory => self.prepare(kind, &export.url_history, report, accept),
            EntityKind::WebsocketUrlHistory => {
                self.prepare(kind, &export.websocket_url_history, report, accept)
            },
            EntityKind::AuthData => self.prepare(kind, &export.auth_data, report, accept),
            EntityKind::HostRule => self.prepare(kind, &export.host_rules, report, accept),
            EntityKind::ClientCertificate => {
                let mut index = Vec::with_capacity(export.client_certificates.len());
                for certificate in &export.client_certificates {
                    match certificate.validate() {
                        Ok(()) => index.push(certificate.index_record()),
                        Err(message) => report.fail(
                            kind,
                            certificate.meta.id().unwrap_or_default(),
                            message,
                        ),
                    }
                }
                self.prepare(kind, &index, report, accept)
            },
            EntityKind::ClientCertificateData => {
                // failures were reported with the index records
                let data: Vec<_> = export
                    .client_certificates
                    .iter()
                    .filter(|certificate| {
                        certificate.meta.id().is_some() && certificate.validate().is_ok()
                    })
                    .map(ClientCertificate::data_record)
                    .collect();
                self.prepare(kind, &data, report, accept)
            },
        };

        if self.options.dry_run {
            return Ok(documents);
        }

        let now = current_timestamp_millis();
        let mut merged = Vec::with_capacity(documents.len());
        for document in documents {
            let id = document.id().unwrap_or_default().to_string();
            match self.merge(kind, document, now) {
                Ok(document) => merged.push(document),
                Err(e @ Error::StoreUnavailable(_)) => return Err(e),
                Err(e) => report.fail(kind, id, e.to_string()),
            }
        }
        Ok(merged)
    }

    /// Converts valid records to documents, reporting the rest.
    fn prepare<E: Entity>(
        &self,
        kind: EntityKind,
        records: &[E],
        report: &mut ImportReport,
        check: impl Fn(&E) -> std::result::Result<(), String>,
    ) -> Vec<Document> {
        let mut documents = Vec::with_capacity(records.len());
        for record in records {
            let Some(id) = record.meta().id() else {
                report.fail(kind, "", "record has no _id");
                continue;
            };
            if let Err(message) = record.validate().and_then(|()| check(record)) {
                report.fail(kind, id, message);
                continue;
            }
            match Document::from_entity(record) {
                Ok(mut document) => {
                    document.set_rev(None);
                    documents.push(document);
                },
                Err(e) => report.fail(kind, id, e.to_string()),
            }
        }
        if self.options.dry_run {
            tracing::debug!(kind = %kind, valid = documents.len(), "dry run, not writing");
        }
        documents
    }

    /// Merges an incoming document with the stored one.
    ///
    /// An existing document's revision is carried forward so the write
    /// replaces it. The stored `created` survives when the incoming record
    /// has none; `updated` becomes now and never falls below `created`.
    fn merge(&self, kind: EntityKind, mut document: Document, now: i64) -> Result<Document> {
        let id = document.id().unwrap_or_default().to_string();
        let existing = self.store.get(kind, &id, None)?;

        match existing {
            None => {
                let created = document.get_i64("created").unwrap_or(now);
                let updated = document.get_i64("updated").unwrap_or(now).max(created);
                document.set_i64("created", created);
                document.set_i64("updated", updated);
            },
            Some(existing) => {
                document.set_rev(existing.rev().map(str::to_string));
                let created = document
                    .get_i64("created")
                    .or_else(|| existing.get_i64("created"))
                    .unwrap_or(now);
                document.set_i64("created", created);
                document.set_i64("updated", now.max(created));
            },
        }
        Ok(document)
    }

    /// Writes the documents of one kind with a single bulk call.
    fn write_kind(
        &self,
        kind: EntityKind,
        documents: Vec<Document>,
        report: &mut ImportReport,
        correlation_id: &str,
    ) -> Result<()> {
        tracing::debug!(kind = %kind, count = documents.len(), "writing batch");
        let results = self.store.bulk_put(kind, documents.clone())?;
        if results.len() != documents.len() {
            return Err(Error::OperationFailed {
                operation: "bulk_put".to_string(),
                cause: format!(
                    "store returned {} results for {} documents",
                    results.len(),
                    documents.len()
                ),
            });
        }

        for (document, result) in documents.into_iter().zip(results) {
            let id = document.id().unwrap_or_default().to_string();
            let outcome = match result {
                Err(Error::RevisionConflict { .. }) if self.options.retry_conflicts => {
                    tracing::debug!(kind = %kind, id = %id, "revision conflict, retrying once");
                    self.retry(kind, document)
                },
                other => other.map(|stamp| (document, stamp)),
            };

            match outcome {
                Ok((document, stamp)) => {
                    report.add_written(kind, 1);
                    self.publish(kind, document, stamp, correlation_id);
                },
                Err(e @ Error::StoreUnavailable(_)) => return Err(e),
                Err(e) => report.fail(kind, id, e.to_string()),
            }
        }
        Ok(())
    }

    /// Re-reads the current revision and writes once more.
    fn retry(&self, kind: EntityKind, mut document: Document) -> Result<(Document, RevisionStamp)> {
        let id = document.id().unwrap_or_default().to_string();
        let current = self.store.get(kind, &id, None)?;
        document.set_rev(current.as_ref().and_then(Document::rev).map(str::to_string));
        let stamp = self.store.put(kind, document.clone())?;
        metrics::counter!("import_conflict_retries_total", "kind" => kind.as_str()).increment(1);
        Ok((document, stamp))
    }

    fn publish(&self, kind: EntityKind, mut document: Document, stamp: RevisionStamp, correlation_id: &str) {
        let Some(bus) = &self.event_bus else {
            return;
        };
        document.set_rev(Some(stamp.rev.clone()));
        bus.publish(ChangeEvent {
            meta: EventMeta::new(EVENT_SOURCE, Some(correlation_id.to_string())),
            kind,
            id: stamp.id,
            rev: stamp.rev,
            item: document.into_value(),
            old_rev: stamp.old_rev,
        });
    }
}

#[allow(clippy::unnecessary_wraps)]
const fn accept<E>(_: &E) -> std::result::Result<(), String> {
    Ok(())
}

/// Rejects requests whose type does not match the collection they are in.
fn slot_check(expected: RequestType) -> impl Fn(&Request) -> std::result::Result<(), String> {
    move |request: &Request| {
        if request.request_type == expected {
            Ok(())
        } else {
            Err(format!(
                "{} request found among {expected} requests",
                request.request_type
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CertificateType, Project, Variable};
    use crate::storage::{ListOptions, MemoryStore, Page};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn memory() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::new())
    }

    fn export_with_requests(urls: &[&str]) -> CanonicalExport {
        let mut export = CanonicalExport::new();
        for (i, url) in urls.iter().enumerate() {
            export
                .requests
                .push(Request::saved(*url).with_id(format!("r{i}")));
        }
        export
    }

    #[test]
    fn test_writes_and_reports() {
        let store = memory();
        let service = ImportService::new(store.clone());
        let report = service
            .import_data(&export_with_requests(&["https://a", "", "https://c"]))
            .unwrap();

        assert_eq!(report.count(EntityKind::Request), 2);
        assert_eq!(report.written(), 2);
        assert_eq!(report.total(), 3);
        assert_eq!(store.count(EntityKind::Request).unwrap(), 2);
        let failures = report.into_failures().unwrap();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].id, "r1");
        assert_eq!(failures[0].kind, EntityKind::Request);
    }

    #[test]
    fn test_into_failures_none_on_success() {
        let service = ImportService::new(memory());
        let report = service
            .import_data(&export_with_requests(&["https://a"]))
            .unwrap();
        assert!(report.into_failures().is_none());
    }

    #[test]
    fn test_dry_run_leaves_store_untouched() {
        let store = memory();
        let service = ImportService::new(store.clone())
            .with_options(ImportOptions::default().with_dry_run(true));
        let report = service
            .import_data(&export_with_requests(&["https://a", "https://b"]))
            .unwrap();
        assert!(report.dry_run);
        assert_eq!(report.written(), 2);
        assert_eq!(report.record_status(), "dry_run");
        assert_eq!(store.count(EntityKind::Request).unwrap(), 0);
    }

    #[test]
    fn test_real_run_records_written_status() {
        let report = ImportService::new(memory())
            .import_data(&export_with_requests(&["https://a"]))
            .unwrap();
        assert_eq!(report.record_status(), "written");
    }

    #[test]
    fn test_missing_id_and_wrong_slot_are_failures() {
        let mut export = CanonicalExport::new();
        export.requests.push(Request::saved("https://no-id"));
        export
            .requests
            .push(Request::history("https://h").with_id("h1"));
        let report = ImportService::new(memory()).import_data(&export).unwrap();
        assert_eq!(report.written(), 0);
        assert_eq!(report.failures.len(), 2);
        assert!(report.failures[1].message.contains("history"));
    }

    #[test]
    fn test_certificates_split_into_index_and_data() {
        let store = memory();
        let mut export = CanonicalExport::new();
        let mut certificate = ClientCertificate::new("client", CertificateType::Pem, "PEM DATA");
        certificate.meta.id = Some("c1".to_string());
        export.client_certificates.push(certificate);
        let mut empty = ClientCertificate::new("broken", CertificateType::P12, "");
        empty.meta.id = Some("c2".to_string());
        export.client_certificates.push(empty);

        let report = ImportService::new(store.clone()).import_data(&export).unwrap();
        assert_eq!(report.written(), 1);
        assert_eq!(report.count(EntityKind::ClientCertificateData), 1);
        assert_eq!(report.failures.len(), 1);

        let index = store
            .get(EntityKind::ClientCertificate, "c1", None)
            .unwrap()
            .unwrap();
        assert_eq!(index.get_str("dataKey"), Some("c1"));
        assert!(index.get("cert").is_none());
        let data = store
            .get(EntityKind::ClientCertificateData, "c1", None)
            .unwrap()
            .unwrap();
        assert_eq!(data.get("cert").and_then(|c| c.get("data")), Some(&serde_json::json!("PEM DATA")));
    }

    #[test]
    fn test_reimport_carries_revision_and_created() {
        let store = memory();
        let service = ImportService::new(store.clone());
        let mut export = CanonicalExport::new();
        export.projects.push(Project::new("P").with_id("p1"));

        service.import_data(&export).unwrap();
        let first = store.get(EntityKind::Project, "p1", None).unwrap().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        service.import_data(&export).unwrap();
        let second = store.get(EntityKind::Project, "p1", None).unwrap().unwrap();

        assert!(second.rev().unwrap().starts_with("2-"));
        assert_eq!(first.get_i64("created"), second.get_i64("created"));
        assert!(second.get_i64("updated") > first.get_i64("updated"));
    }

    #[tokio::test]
    async fn test_events_published_per_write() {
        let bus = EventBus::new(16);
        let mut receiver = bus.subscribe();
        let mut export = CanonicalExport::new();
        let mut variable = Variable::new("host", "a");
        variable.meta.id = Some("v1".to_string());
        export.variables.push(variable);

        ImportService::new(memory())
            .with_event_bus(bus)
            .import_data(&export)
            .unwrap();

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.kind, EntityKind::Variable);
        assert_eq!(event.id, "v1");
        assert!(event.is_create());
        assert_eq!(event.item["_rev"], serde_json::json!(event.rev));
        assert_eq!(event.meta.source, "import");
    }

    /// Store whose bulk writes report conflicts a fixed number of times.
    struct ConflictingStore {
        inner: MemoryStore,
        conflicts_left: AtomicUsize,
        puts: Mutex<Vec<String>>,
    }

    impl ConflictingStore {
        fn new(conflicts: usize) -> Self {
            Self {
                inner: MemoryStore::new(),
                conflicts_left: AtomicUsize::new(conflicts),
                puts: Mutex::new(Vec::new()),
            }
        }

        fn conflict(&self, kind: EntityKind, document: &Document) -> Option<Error> {
            let left = self.conflicts_left.load(Ordering::SeqCst);
            (left > 0).then(|| {
                self.conflicts_left.store(left - 1, Ordering::SeqCst);
                Error::RevisionConflict {
                    kind: kind.to_string(),
                    id: document.id().unwrap_or_default().to_string(),
                }
            })
        }
    }

    impl DocumentStore for ConflictingStore {
        fn backend_name(&self) -> &'static str {
            "conflicting"
        }

        fn get(&self, kind: EntityKind, id: &str, rev: Option<&str>) -> Result<Option<Document>> {
            self.inner.get(kind, id, rev)
        }

        fn put(&self, kind: EntityKind, document: Document) -> Result<RevisionStamp> {
            self.puts
                .lock()
                .unwrap()
                .push(document.id().unwrap_or_default().to_string());
            match self.conflict(kind, &document) {
                Some(e) => Err(e),
                None => self.inner.put(kind, document),
            }
        }

        fn list(&self, kind: EntityKind, options: &ListOptions) -> Result<Page> {
            self.inner.list(kind, options)
        }

        fn delete(&self, kind: EntityKind, id: &str, rev: Option<&str>) -> Result<bool> {
            self.inner.delete(kind, id, rev)
        }

        fn count(&self, kind: EntityKind) -> Result<usize> {
            self.inner.count(kind)
        }
    }

    #[test]
    fn test_conflict_retried_once() {
        let store = Arc::new(ConflictingStore::new(1));
        let report = ImportService::new(store.clone())
            .import_data(&export_with_requests(&["https://a"]))
            .unwrap();
        assert_eq!(report.written(), 1);
        assert!(report.failures.is_empty());
        assert_eq!(store.puts.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_second_conflict_is_failure() {
        let store = Arc::new(ConflictingStore::new(2));
        let report = ImportService::new(store.clone())
            .import_data(&export_with_requests(&["https://a"]))
            .unwrap();
        assert_eq!(report.written(), 0);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].message.contains("revision conflict"));
        assert_eq!(store.puts.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_conflict_without_retry_is_failure() {
        let store = Arc::new(ConflictingStore::new(1));
        let report = ImportService::new(store.clone())
            .with_options(ImportOptions::default().with_retry_conflicts(false))
            .import_data(&export_with_requests(&["https://a"]))
            .unwrap();
        assert_eq!(report.failures.len(), 1);
        assert_eq!(store.puts.lock().unwrap().len(), 1);
    }

    /// Store that becomes unavailable when a given kind is written.
    struct FailingStore {
        inner: MemoryStore,
        fail_on: EntityKind,
    }

    impl DocumentStore for FailingStore {
        fn backend_name(&self) -> &'static str {
            "failing"
        }

        fn get(&self, kind: EntityKind, id: &str, rev: Option<&str>) -> Result<Option<Document>> {
            self.inner.get(kind, id, rev)
        }

        fn put(&self, kind: EntityKind, document: Document) -> Result<RevisionStamp> {
            if kind == self.fail_on {
                return Err(Error::StoreUnavailable("disk detached".to_string()));
            }
            self.inner.put(kind, document)
        }

        fn list(&self, kind: EntityKind, options: &ListOptions) -> Result<Page> {
            self.inner.list(kind, options)
        }

        fn delete(&self, kind: EntityKind, id: &str, rev: Option<&str>) -> Result<bool> {
            self.inner.delete(kind, id, rev)
        }

        fn count(&self, kind: EntityKind) -> Result<usize> {
            self.inner.count(kind)
        }
    }

    #[test]
    fn test_store_unavailable_aborts_but_keeps_earlier_writes() {
        let store = Arc::new(FailingStore {
            inner: MemoryStore::new(),
            fail_on: EntityKind::Project,
        });
        let mut export = export_with_requests(&["https://a"]);
        export.projects.push(Project::new("P").with_id("p1"));

        let result = ImportService::new(store.clone()).import_data(&export);
        assert!(matches!(result, Err(Error::StoreUnavailable(_))));
        assert_eq!(store.count(EntityKind::Request).unwrap(), 1);
        assert_eq!(store.count(EntityKind::Project).unwrap(), 0);
    }
}
