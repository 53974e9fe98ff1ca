// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for registry churn.
//!
//! Measures the performance of:
//! - Submitting past capacity (every submit evicts)
//! - Ticking a full registry
//! - Position queries over a full registry

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::time::{Duration, Instant};
use toast_rack::config::ToastsConfig;
use toast_rack::domain::Capacity;
use toast_rack::notifications::{NotificationOptions, Position, Registry};

fn full_registry(capacity: usize, now: Instant) -> Registry {
    let mut registry = Registry::new(Capacity::new(capacity), ToastsConfig::default());
    for (i, position) in Position::ALL.iter().cycle().take(capacity).enumerate() {
        registry.submit_at(
            NotificationOptions::new()
                .message(format!("toast {i}"))
                .position(*position),
            now,
        );
    }
    registry
}

/// Benchmark submission into a full registry.
///
/// Every submit evicts the oldest toast and runs its close callback.
fn bench_submit_with_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_churn");

    for capacity in [5_usize, 50] {
        group.bench_with_input(
            BenchmarkId::new("submit_evict", capacity),
            &capacity,
            |b, &capacity| {
                let now = Instant::now();
                let mut registry = full_registry(capacity, now);
                b.iter(|| {
                    let id = registry.submit_at(
                        NotificationOptions::new().on_close(|n| {
                            black_box(n.id());
                        }),
                        now,
                    );
                    black_box(id);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark one tick over every live countdown.
fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_churn");

    group.bench_function("tick_full_registry", |b| {
        let start = Instant::now();
        let mut registry = full_registry(50, start);
        let mut step: u64 = 0;
        b.iter(|| {
            // Stay below the default duration so nothing expires.
            step = (step + 1) % 400_000;
            black_box(registry.tick(start + Duration::from_micros(step * 10)));
        });
    });

    group.finish();
}

fn bench_query_by_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_churn");

    let registry = full_registry(50, Instant::now());
    group.bench_function("query_by_position", |b| {
        b.iter(|| black_box(registry.query_by_position(Position::TopRight).count()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_submit_with_eviction,
    bench_tick,
    bench_query_by_position
);
criterion_main!(benches);
