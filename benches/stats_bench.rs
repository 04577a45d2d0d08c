//! Benchmarks for ApiPulse statistics
//!
//! Run with: cargo bench

use apipulse::telemetry::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn create_test_samples(count: usize) -> Vec<RequestSample> {
    (0..count)
        .map(|i| {
            let status = if i % 20 == 0 { 500 } else { 200 };
            RequestSample::new("/api/users", "GET", status, (i % 250) as f64)
                .timestamp(i as i64 * 100)
        })
        .collect()
}

fn bench_latency_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("latency_summary");

    for size in [100, 1000, 10000] {
        let samples = create_test_samples(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("summary_{}", size), |b| {
            b.iter(|| latency_summary(black_box(&samples)))
        });
    }

    group.finish();
}

fn bench_bucketed_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("bucketed_series");

    for size in [1000, 10000] {
        let samples = create_test_samples(size);
        let range = TimeRange::new(0, size as i64 * 100);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("series_{}", size), |b| {
            b.iter(|| bucketed_series(black_box(&samples), range, 60))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_latency_summary, bench_bucketed_series);
criterion_main!(benches);
