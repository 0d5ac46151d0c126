//! Criterion benchmarks for service_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use serde_json::json;
use service_logger::prelude::*;
use std::sync::Arc;
use std::time::Duration;

/// Sink that discards everything, so only logger overhead is measured
struct NullSink;

impl Sink for NullSink {
    fn write(&self, line: &str) -> Result<()> {
        black_box(line);
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

// ============================================================================
// Record Benchmarks
// ============================================================================

fn bench_record_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_serialization");
    group.throughput(Throughput::Elements(1));

    let plain = LogRecord::new("bench", Severity::Operational, "request served");
    group.bench_function("plain", |b| {
        b.iter(|| black_box(plain.to_json_line()));
    });

    let meta = Meta::new()
        .with_field("route", "/api/orders")
        .with_field("status", 200)
        .with_field("elapsed_ms", 12.5);
    let full = LogRecord::new("bench", Severity::Error, "request failed")
        .with_meta(Some(meta))
        .with_error(Some(json!({"code": "E_TIMEOUT"})));
    group.bench_function("with_meta_and_error", |b| {
        b.iter(|| black_box(full.to_json_line()));
    });

    group.finish();
}

fn bench_error_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("error_normalization");

    let object = ErrorInput::Object(json!({"errorCode": "101", "errorMessage": "the end"}));
    group.bench_function("logify_object", |b| {
        b.iter(|| black_box(logify(black_box(&object))));
    });

    let error = ErrorInput::Error(CapturedError::new("bad"));
    group.bench_function("errorify_error", |b| {
        b.iter(|| black_box(errorify(black_box(&error))));
    });

    group.finish();
}

// ============================================================================
// Logging Benchmarks
// ============================================================================

fn bench_sync_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync_logging");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::builder("bench")
        .sink(Arc::new(NullSink))
        .min_severity(Severity::Debug)
        .build();

    group.bench_function("operational", |b| {
        b.iter(|| logger.log(black_box("Info message"), None));
    });

    group.bench_function("with_meta", |b| {
        b.iter(|| {
            logger.log(
                black_box("Info message"),
                Some(Meta::new().with_field("user_id", 42)),
            )
        });
    });

    group.finish();
}

fn bench_buffered_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffered_logging");
    group.throughput(Throughput::Elements(1000));

    let mut logger = Logger::builder("bench")
        .sink(Arc::new(NullSink))
        .flush_interval(Duration::from_secs(3600))
        .build();

    group.bench_function("append_and_flush_1000", |b| {
        b.iter(|| {
            for i in 0..1000 {
                let _ = logger.log(format!("Message {}", i), None);
            }
            logger.flush()
        });
    });

    group.finish();
    logger.stop();
}

fn bench_severity_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("severity_filtering");

    let logger = Logger::builder("bench")
        .sink(Arc::new(NullSink))
        .min_severity(Severity::Error)
        .build();

    group.bench_function("filtered_debug", |b| {
        b.iter(|| logger.debug(black_box("Filtered message"), None));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_record_serialization,
    bench_error_normalization,
    bench_sync_logging,
    bench_buffered_logging,
    bench_severity_filtering,
);
criterion_main!(benches);
