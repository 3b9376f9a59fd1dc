//! Benchmark for AvlTree vs standard BTreeSet.
//!
//! Compares insert, search, and split/merge against Rust's standard
//! `BTreeSet` (whose `split_off`/`append` are the closest equivalents).

use arbor::collections::AvlTree;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeSet;
use std::hint::black_box;

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in [100, 1000, 10000] {
        group.bench_with_input(BenchmarkId::new("AvlTree", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut tree: AvlTree<i32> = AvlTree::new();
                for index in 0..size {
                    let _ = tree.insert(black_box(index));
                }
                black_box(tree)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut set = BTreeSet::new();
                for index in 0..size {
                    set.insert(black_box(index));
                }
                black_box(set)
            });
        });
    }

    group.finish();
}

// =============================================================================
// search Benchmark
// =============================================================================

fn benchmark_search(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("search");

    for size in [100, 1000, 10000] {
        let tree: AvlTree<i32> = (0..size).collect();
        let set: BTreeSet<i32> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("AvlTree", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut found = 0;
                for key in 0..size {
                    found += usize::from(tree.search(&black_box(key)));
                }
                black_box(found)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut found = 0;
                for key in 0..size {
                    found += usize::from(set.contains(&black_box(key)));
                }
                black_box(found)
            });
        });
    }

    group.finish();
}

// =============================================================================
// split/merge Benchmark
// =============================================================================

fn benchmark_split_merge(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("split_merge");

    for size in [1000, 10000, 100_000] {
        let tree: AvlTree<i32> = (0..size).collect();
        let set: BTreeSet<i32> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("AvlTree", size), &size, |bencher, &size| {
            bencher.iter_batched(
                || tree.clone(),
                |tree| {
                    let (low, high) = tree.split(&black_box(size / 3));
                    black_box(AvlTree::merge(low, high))
                },
                criterion::BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &size, |bencher, &size| {
            bencher.iter_batched(
                || set.clone(),
                |mut low| {
                    let mut high = low.split_off(&black_box(size / 3 + 1));
                    low.append(&mut high);
                    black_box(low)
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_search,
    benchmark_split_merge
);

criterion_main!(benches);
