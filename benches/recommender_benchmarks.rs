//! # Muse Graph Performance Benchmarks
//!
//! Benchmarks for the four graph queries on a synthetic graph that is much
//! larger than the seeded one.
//!
//! ## Benchmark Categories
//!
//! - **Similarity**: Ranking a new user against every existing user
//! - **Songs**: Top-genre song selection
//! - **Path**: Dijkstra between distant users
//! - **Groups**: Bron–Kerbosch over the compatibility graph
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench
//! cargo bench path
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use muse_graph::graph::{Affinity, Catalog, GraphStore, Preferences};
use muse_graph::{groups, path, similarity, songs};
use std::hint::black_box;

const GENRES: usize = 12;

fn affinity(value: f64) -> Affinity {
    Affinity::new(value).expect("benchmark affinity in range")
}

/// Deterministic synthetic graph: each user rates three neighbouring genres
fn create_benchmark_store(users: usize) -> GraphStore {
    let catalog = (0..GENRES).fold(Catalog::new(), |catalog, g| {
        catalog.with_genre(format!("genre{g}"), (0..5).map(|s| format!("Song {s} - Artist {g}")))
    });

    let mut store = GraphStore::new(catalog);
    for u in 0..users {
        #[allow(clippy::cast_precision_loss)]
        let prefs: Preferences = (0..3)
            .map(|k| {
                let genre = format!("genre{}", (u + k) % GENRES);
                (genre, affinity(((u * 7 + k * 3) % 10) as f64 / 10.0 + 0.05))
            })
            .collect();
        store
            .add_user(&format!("user{u}"), &prefs)
            .expect("benchmark user is valid");
    }
    store
}

fn bench_similarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity");
    let new_prefs: Preferences = (0..GENRES)
        .map(|g| (format!("genre{g}"), affinity(0.5)))
        .collect();

    for size in [10, 100, 1000] {
        let store = create_benchmark_store(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &store, |b, store| {
            b.iter(|| similarity::rank_similar(black_box("new"), black_box(&new_prefs), store.users()));
        });
    }
    group.finish();
}

fn bench_songs(c: &mut Criterion) {
    let store = create_benchmark_store(10);
    let prefs: Preferences = (0..GENRES)
        .map(|g| (format!("genre{g}"), affinity(g as f64 / GENRES as f64)))
        .collect();

    c.bench_function("songs/top_two", |b| {
        b.iter(|| songs::recommend_songs(black_box(&prefs), store.songs()));
    });
}

fn bench_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("path");
    for size in [10, 100, 1000] {
        let store = create_benchmark_store(size);
        let target = format!("user{}", size - 1);
        group.bench_with_input(BenchmarkId::from_parameter(size), &store, |b, store| {
            b.iter(|| path::shortest_path(store, black_box("user0"), black_box(&target)));
        });
    }
    group.finish();
}

fn bench_groups(c: &mut Criterion) {
    let mut group = c.benchmark_group("groups");
    for size in [10, 100, 300] {
        let store = create_benchmark_store(size);
        group.bench_with_input(BenchmarkId::new("cliques", size), &store, |b, store| {
            b.iter(|| groups::find_identical_groups(black_box(store)));
        });
        group.bench_with_input(BenchmarkId::new("classes", size), &store, |b, store| {
            b.iter(|| groups::identical_taste_classes(black_box(store)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_similarity, bench_songs, bench_path, bench_groups);
criterion_main!(benches);
