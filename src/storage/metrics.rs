//! Shared metrics recording for document stores.

use std::time::Instant;

/// Records operation metrics for a store call.
///
/// Two series are recorded per call:
/// 1. `storage_operations_total` - counter by backend, operation, and status
/// 2. `storage_operation_duration_ms` - latency histogram with the same labels
///
/// # Examples
///
/// ```ignore
/// use std::time::Instant;
/// use restvault::storage::metrics::record_operation_metrics;
///
/// let start = Instant::now();
/// // ... perform operation ...
/// let status = if result.is_ok() { "success" } else { "error" };
/// record_operation_metrics("sqlite", "put", start, status);
/// ```
pub fn record_operation_metrics(
    backend: &'static str,
    operation: &'static str,
    start: Instant,
    status: &'static str,
) {
    metrics::counter!(
        "storage_operations_total",
        "backend" => backend,
        "operation" => operation,
        "status" => status
    )
    .increment(1);
    metrics::histogram!(
        "storage_operation_duration_ms",
        "backend" => backend,
        "operation" => operation,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64() * 1000.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_record_without_recorder_installed() {
        let start = Instant::now();
        record_operation_metrics("memory", "put", start, "success");
        record_operation_metrics("sqlite", "bulk_put", start, "error");
    }

    #[test]
    fn test_record_from_threads() {
        let handles: Vec<_> = (0..4u64)
            .map(|i| {
                let status = if i % 2 == 0 { "success" } else { "error" };
                thread::spawn(move || {
                    let start = Instant::now();
                    thread::sleep(Duration::from_millis(i));
                    record_operation_metrics("memory", "get", start, status);
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("thread panicked");
        }
    }
}
