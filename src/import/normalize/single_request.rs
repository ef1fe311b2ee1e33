//! A single request saved on its own.

use serde_json::Value;

use super::NormalizedExport;
use super::records;
use crate::models::{CanonicalExport, RequestType};

/// Normalizes a lone request object into one saved request.
#[must_use]
pub fn normalize(data: &Value) -> NormalizedExport {
    let mut export = CanonicalExport::new();
    if let Some(obj) = data.as_object() {
        export
            .requests
            .push(records::request(obj, RequestType::Saved));
    }
    NormalizedExport::unlinked(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_request() {
        let normalized = normalize(&json!({
            "url": "https://example.com/items",
            "method": "POST",
            "headers": "Content-Type: application/json",
            "payload": "{}",
            "name": "Create item"
        }));
        let export = normalized.export;
        assert_eq!(export.requests.len(), 1);
        assert_eq!(export.total_records(), 1);
        let request = &export.requests[0];
        assert_eq!(request.method, "POST");
        assert_eq!(request.name, "Create item");
        assert_eq!(request.request_type, RequestType::Saved);
        assert!(normalized.links.is_empty());
    }
}
