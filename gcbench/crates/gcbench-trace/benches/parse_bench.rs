//! gctrace Parser Benchmarks
//!
//! Run with: `cargo bench --package gcbench-trace`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use gcbench_trace::parse_trace;

const THREE_PHASE: &str = "gc 1 @0.012s 0%: 0.011+0.39+0.0061 ms clock, \
    0.011+0.10/0.28/0+0.0061 ms cpu, 4->4->3 MB, 5 MB goal, 4 P\n";

const FIVE_PHASE: &str = "gc 12 @3.456s 7%: 0.10+1.5+0.20+4.0+0.30 ms clock, \
    0.40+3.0+0.10+1.0/8.0/2.0+1.2 ms cpu, 40->44->20 MB, 42 MB goal, 8 P\n";

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_trace");

    for (name, line) in [("three_phase", THREE_PHASE), ("five_phase", FIVE_PHASE)] {
        let text = line.repeat(1_000);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(name, |b| b.iter(|| black_box(parse_trace(&text).unwrap())));
    }

    let noisy = format!("{}program output line\n", THREE_PHASE).repeat(1_000);
    group.throughput(Throughput::Bytes(noisy.len() as u64));
    group.bench_function("interleaved_output", |b| {
        b.iter(|| black_box(parse_trace(&noisy).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
