//! LatencyDist Benchmarks
//!
//! Run with: `cargo bench --package gcbench-lat`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use gcbench_lat::LatencyDist;
use std::time::Duration;

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("latency_add");
    group.throughput(Throughput::Elements(1));

    let dist = LatencyDist::new();
    group.bench_function("single_thread", |b| {
        let mut ns = 1u64;
        b.iter(|| {
            ns = ns.wrapping_mul(6364136223846793005).wrapping_add(1) % 1_000_000_000;
            dist.add(black_box(Duration::from_nanos(ns)))
        })
    });

    group.bench_function("to_bucket", |b| {
        b.iter(|| LatencyDist::to_bucket(black_box(Duration::from_micros(123))))
    });

    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("latency_query");

    let dist = LatencyDist::new();
    for i in 1..100_000u64 {
        dist.add(Duration::from_nanos(i * 37 % 50_000_000));
    }

    group.bench_function("quantile_p99", |b| b.iter(|| black_box(dist.quantile(0.99))));
    group.bench_function("hist_70x5", |b| b.iter(|| black_box(dist.hist(70, 5))));
    group.bench_function("table", |b| b.iter(|| black_box(dist.table())));

    group.finish();
}

criterion_group!(benches, bench_add, bench_query);
criterion_main!(benches);
