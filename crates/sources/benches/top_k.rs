//! Benchmarks for top-k selection and candidate generation
//!
//! Run with: cargo bench --package sources

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use graph_store::Traversal;
use graph_store::fixtures::{random_graph, RandomGraphConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sources::{build_user_context, select_top_k, CoOccurrenceSource, EdgeDislikes};
use std::sync::Arc;

fn bench_select_top_k(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    let scores: Vec<(u32, u32)> = (0..100_000).map(|i| (i, rng.random_range(0..1_000))).collect();

    c.bench_function("select_top_10_of_100k", |b| {
        b.iter(|| black_box(select_top_k(black_box(scores.iter().copied()), 10)))
    });
    c.bench_function("select_top_25_of_100k", |b| {
        b.iter(|| black_box(select_top_k(black_box(scores.iter().copied()), 25)))
    });
}

fn bench_co_occurrence(c: &mut Criterion) {
    let config = RandomGraphConfig {
        users: 2_000,
        ..RandomGraphConfig::default()
    };
    let graph: Arc<dyn Traversal> = Arc::new(random_graph(config, 11).expect("Failed to build graph"));
    let source = CoOccurrenceSource::new(graph.clone());
    let context = build_user_context(graph.as_ref(), "user10", &EdgeDislikes)
        .expect("Failed to build user context")
        .expect("user10 exists");

    c.bench_function("co_occurrence_get_candidates", |b| {
        b.iter(|| black_box(source.get_candidates(black_box(&context)).unwrap()))
    });
}

criterion_group!(benches, bench_select_top_k, bench_co_occurrence);
criterion_main!(benches);
