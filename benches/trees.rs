use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use bubble_ist::{
    ist::BubbleSortRule,
    tree::SpanningTree,
    universe::{Dimension, Universe},
};

fn universe(c: &mut Criterion) {
    let mut group = c.benchmark_group("universe");
    for n in [5, 6, 7] {
        let d = Dimension::new(n).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &d, |b, &d| {
            b.iter(|| Universe::new(black_box(d)))
        });
    }
    group.finish();
}

fn build_all_trees(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_all_trees");
    for n in [5, 6, 7] {
        let d = Dimension::new(n).unwrap();
        let universe = Universe::new(d);
        let rule = BubbleSortRule::new(d);
        group.bench_with_input(BenchmarkId::from_parameter(n), &universe, |b, universe| {
            b.iter(|| {
                for t in d.tree_indices() {
                    black_box(SpanningTree::build(universe, &rule, t).unwrap());
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, universe, build_all_trees);
criterion_main!(benches);
