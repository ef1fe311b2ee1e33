//! Benchmarks for detection, normalization, and import.
//!
//! Benchmark targets:
//! - Format detection: <10us
//! - Normalizing a 1000-request collection: <20ms
//! - Importing 1000 requests into the memory store: <50ms

// Criterion macros generate items without docs - this is expected for benchmarks
#![allow(missing_docs)]
// Benchmarks use unwrap for simplicity
#![allow(clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use serde_json::{Value, json};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

use restvault::import::{ImportOptions, ImportService, detect, normalize};
use restvault::storage::MemoryStore;

/// Collection with `count` requests spread over nested folders.
fn collection(count: usize) -> Value {
    let folders: Vec<Value> = (0..count.div_ceil(10))
        .map(|folder| {
            let items: Vec<Value> = (0..10)
                .map(|i| folder * 10 + i)
                .take_while(|n| *n < count)
                .map(|n| {
                    json!({
                        "name": format!("request {n}"),
                        "id": format!("req-{n}"),
                        "request": {
                            "method": "POST",
                            "url": {"raw": format!("https://api.example.com/items/{n}")},
                            "header": [{"key": "Content-Type", "value": "application/json"}],
                            "body": {"mode": "raw", "raw": format!("{{\"n\":{n}}}")}
                        }
                    })
                })
                .collect();
            json!({"name": format!("folder {folder}"), "item": [{"name": "inner", "item": items}]})
        })
        .collect();

    json!({
        "info": {
            "_postman_id": "bench-collection",
            "name": "Bench",
            "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
        },
        "item": folders
    })
}

fn legacy_export(count: usize) -> Value {
    let requests: Vec<Value> = (0..count)
        .map(|n| json!({"name": format!("r{n}"), "url": format!("https://legacy.example/{n}")}))
        .collect();
    json!({"projects": [{"name": "legacy", "requests": requests}]})
}

fn bench_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("detection");
    let v2 = collection(10);
    let legacy = legacy_export(10);

    group.bench_function("postman_v2", |b| {
        b.iter(|| detect(black_box(&v2)));
    });

    // Legacy objects is the last signature checked
    group.bench_function("legacy_objects", |b| {
        b.iter(|| detect(black_box(&legacy)));
    });

    group.finish();
}

fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");
    group.measurement_time(Duration::from_secs(5));

    for size in [10, 100, 1000] {
        let v2 = collection(size);
        let legacy = legacy_export(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("postman_v2", size), &v2, |b, data| {
            b.iter(|| normalize(black_box(data)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("legacy_objects", size), &legacy, |b, data| {
            b.iter(|| normalize(black_box(data)).unwrap());
        });
    }

    group.finish();
}

fn bench_import(c: &mut Criterion) {
    let mut group = c.benchmark_group("import");
    group.measurement_time(Duration::from_secs(5));

    for size in [100, 1000] {
        let export = normalize(&collection(size)).unwrap();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("memory", size), &export, |b, export| {
            b.iter(|| {
                let service = ImportService::new(Arc::new(MemoryStore::new()));
                service.import_data(black_box(export)).unwrap()
            });
        });
        group.bench_with_input(BenchmarkId::new("dry_run", size), &export, |b, export| {
            b.iter(|| {
                let service = ImportService::new(Arc::new(MemoryStore::new()))
                    .with_options(ImportOptions::default().with_dry_run(true));
                service.import_data(black_box(export)).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_detection,
    bench_normalization,
    bench_import
);
criterion_main!(benches);
