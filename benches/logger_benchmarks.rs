//! Criterion benchmarks for lodge

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lodge::prelude::*;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;

fn registry(pairs: &[(&str, &str)]) -> LoggerRegistry {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    LoggerRegistry::with_env_and_stream(env, LogStream::from_writer(io::sink()))
}

// ============================================================================
// Configuration Benchmarks
// ============================================================================

fn bench_configure(c: &mut Criterion) {
    let mut group = c.benchmark_group("configure");
    group.throughput(Throughput::Elements(1));

    let json = registry(&[(
        "LOG_EXTRA_FIELDS",
        r#"{"program":{"name":"bench","version":"v1"},"host":"%(process)d"}"#,
    )]);
    group.bench_function("json", |b| {
        b.iter(|| black_box(json.configure(black_box("bench.json")).unwrap()));
    });

    let text = registry(&[("LOG_ENV", "DEV")]);
    group.bench_function("text", |b| {
        b.iter(|| black_box(text.configure(black_box("bench.text")).unwrap()));
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    let json = registry(&[]).configure("bench").unwrap();
    group.bench_function("json_info", |b| {
        b.iter(|| json.info(black_box("Info message")));
    });

    let text = registry(&[("LOG_ENV", "DEV")]).configure("bench").unwrap();
    group.bench_function("text_info", |b| {
        b.iter(|| text.info(black_box("Info message")));
    });

    group.bench_function("filtered_debug", |b| {
        b.iter(|| json.debug(black_box("Debug message")));
    });

    group.finish();
}

fn bench_proxy(c: &mut Criterion) {
    let mut group = c.benchmark_group("proxy");
    group.throughput(Throughput::Elements(1));

    let shared = Arc::new(registry(&[]));
    let module = ProxyLogger::for_module("bench::proxy").with_registry(Arc::clone(&shared));
    group.bench_function("module_bound", |b| {
        b.iter(|| module.info(black_box("Proxy message")));
    });

    let caller = ProxyLogger::caller().with_registry(shared);
    group.bench_function("caller_bound", |b| {
        b.iter(|| caller.info(black_box("Proxy message")));
    });

    group.finish();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");

    let record = LogRecord::new(LogLevel::Warn, "bench.format", "Formatting message");
    let template = Template::compile("%(asctime)s [%(levelname)-5s] %(name)s: %(message)s").unwrap();
    group.bench_function("template", |b| {
        b.iter(|| black_box(template.render(black_box(&record))));
    });

    let text = Formatter::text();
    group.bench_function("text", |b| {
        b.iter(|| black_box(text.format(black_box(&record)).unwrap()));
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_configure,
    bench_logging,
    bench_proxy,
    bench_formatting
);

criterion_main!(benches);
