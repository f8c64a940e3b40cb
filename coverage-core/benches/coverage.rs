use std::collections::HashSet;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use coverage_core::bktree::BkTree;
use coverage_core::coverage::FrameCoverage;
use coverage_core::monitor::{BkMonitor, CoverageMonitor, MonitorConfig};

/// Deterministic xorshift64 so benches don't depend on a `rand` dependency
/// and stay reproducible across runs.
fn xorshift_stream(mut state: u64) -> impl FnMut() -> u64 {
    move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    }
}

fn bench_bktree_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("bktree_insert");
    for &n in &[100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut rng = xorshift_stream(0x9E3779B97F4A7C15);
                let mut tree = BkTree::new();
                for _ in 0..n {
                    tree.insert(black_box(rng()));
                }
                tree
            });
        });
    }
    group.finish();
}

fn bench_bktree_find_all_within(c: &mut Criterion) {
    let mut rng = xorshift_stream(0xD1B54A32D192ED03);
    let mut tree = BkTree::new();
    for _ in 0..10_000 {
        tree.insert(rng());
    }

    let mut group = c.benchmark_group("bktree_find_all_within");
    for &r in &[2u32, 5, 10] {
        group.bench_with_input(BenchmarkId::from_parameter(r), &r, |b, &r| {
            b.iter(|| black_box(tree.find_all_within(black_box(0x1234_5678_9ABC_DEF0), r)));
        });
    }
    group.finish();
}

fn bench_monitor_add_cov(c: &mut Criterion) {
    let mut group = c.benchmark_group("monitor_add_cov");
    for &n in &[10usize, 100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut rng = xorshift_stream(0x2545F4914F6CDD1D);
                let mut monitor = BkMonitor::new(MonitorConfig::new(5).unwrap());
                for _ in 0..n {
                    let hashes: HashSet<u64> = (0..8).map(|_| rng()).collect();
                    let cov = FrameCoverage::new(hashes);
                    monitor.add_cov(black_box(&cov));
                }
                monitor.coverage_count()
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_bktree_insert,
    bench_bktree_find_all_within,
    bench_monitor_add_cov
);
criterion_main!(benches);
