//! Criterion benches for the base curve and the traverser.
//!
//! - Base path + base order up to D=12.
//! - Full traversal at D=3 and D=4 (the 5733-sequence oracle).
//! - A fixed step budget at D=5, which never finishes exhaustively.
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sfc_orient::api::{derive_order, generate_path, traverse, traverse_with, TraverseCfg};

fn bench_base_curve(c: &mut Criterion) {
    let mut group = c.benchmark_group("base_curve");
    for dim in [4u32, 8, 12] {
        group.bench_with_input(BenchmarkId::new("path+order", dim), &dim, |b, &d| {
            b.iter(|| derive_order(&generate_path(d)))
        });
    }
    group.finish();
}

fn bench_traverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("traverse");
    group.sample_size(10);
    for dim in [3u32, 4] {
        group.bench_with_input(BenchmarkId::new("exhaustive", dim), &dim, |b, &d| {
            b.iter(|| traverse(d).unwrap().total_solutions)
        });
    }
    group.bench_function(BenchmarkId::new("budget_1e6", 5), |b| {
        b.iter(|| {
            let cfg = TraverseCfg {
                max_steps: Some(1_000_000),
                ..TraverseCfg::default()
            };
            traverse_with(5, cfg).unwrap().total_solutions
        })
    });
    group.finish();
}

criterion_group!(benches, bench_base_curve, bench_traverse);
criterion_main!(benches);
