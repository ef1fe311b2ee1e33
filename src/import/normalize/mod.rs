//! Per-format normalizers.
//!
//! Each normalizer is a pure function from a parsed export to a
//! [`NormalizedExport`]. Normalizers never touch the store and never fail:
//! incomplete records are filled with defaults and records of the wrong
//! shape are skipped with a warning.

pub mod document_store;
pub mod fields;
pub mod legacy;
pub mod postman_environment;
pub mod postman_v1;
pub mod postman_v2;
pub mod records;
pub mod single_request;

use serde_json::Value;

use super::detect::ExportFormat;
use crate::models::{CanonicalExport, RequestType};

/// A request that belongs to a project but was not linked by id in the
/// source format.
///
/// Indexes point into the [`CanonicalExport`] sequences; the identity
/// resolver turns them into id references once every entity has an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectLink {
    /// Index into `projects`.
    pub project: usize,
    /// Index into `requests` or `history`, depending on `request_type`.
    pub request: usize,
    /// Which request sequence `request` indexes.
    pub request_type: RequestType,
}

impl ProjectLink {
    /// Links a saved request to a project.
    #[must_use]
    pub const fn saved(project: usize, request: usize) -> Self {
        Self {
            project,
            request,
            request_type: RequestType::Saved,
        }
    }
}

/// Output of a normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedExport {
    /// Canonical records, possibly without ids.
    pub export: CanonicalExport,
    /// Pending project/request links.
    pub links: Vec<ProjectLink>,
}

impl NormalizedExport {
    /// Wraps an export that needs no relinking.
    #[must_use]
    pub fn unlinked(export: CanonicalExport) -> Self {
        Self {
            export,
            links: Vec::new(),
        }
    }
}

/// Runs the normalizer for `format`.
#[must_use]
pub fn normalize_format(format: ExportFormat, data: &Value) -> NormalizedExport {
    let normalized = match format {
        ExportFormat::LegacyDocument => legacy::normalize_document(data),
        ExportFormat::LegacyObjects => legacy::normalize_objects(data),
        ExportFormat::DocumentStore => document_store::normalize(data),
        ExportFormat::SingleRequest => single_request::normalize(data),
        ExportFormat::PostmanV1 => postman_v1::normalize(data),
        ExportFormat::PostmanV2 => postman_v2::normalize(data),
        ExportFormat::PostmanEnvironment => postman_environment::normalize(data),
    };
    tracing::debug!(
        format = %format,
        records = normalized.export.total_records(),
        links = normalized.links.len(),
        "normalized export"
    );
    normalized
}
