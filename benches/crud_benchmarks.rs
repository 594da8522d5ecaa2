use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::collections::BTreeMap;
use llrb_tree::RBTreeMap;

const N: usize = 10_000;

// ─── Key sequences ──────────────────────────────────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Simple LCG for a deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn key_orders() -> [(&'static str, Vec<i64>); 3] {
    [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ]
}

// ─── Map benchmarks ─────────────────────────────────────────────────────────

fn bench_map_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_insert");

    for (order, keys) in key_orders() {
        group.bench_function(BenchmarkId::new("RBTreeMap", order), |b| {
            b.iter(|| {
                let mut map = RBTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", order), |b| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });
    }

    group.finish();
}

fn bench_map_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_get");

    for (order, keys) in key_orders() {
        let rb_map: RBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        group.bench_function(BenchmarkId::new("RBTreeMap", order), |b| {
            b.iter(|| {
                for k in &keys {
                    black_box(rb_map.get(k));
                }
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", order), |b| {
            b.iter(|| {
                for k in &keys {
                    black_box(bt_map.get(k));
                }
            });
        });
    }

    group.finish();
}

fn bench_map_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_remove");

    for (order, keys) in key_orders() {
        let rb_map: RBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        group.bench_function(BenchmarkId::new("RBTreeMap", order), |b| {
            b.iter_batched(
                || rb_map.clone(),
                |mut map| {
                    for k in &keys {
                        map.remove(k);
                    }
                    map
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(BenchmarkId::new("BTreeMap", order), |b| {
            b.iter_batched(
                || bt_map.clone(),
                |mut map| {
                    for k in &keys {
                        map.remove(k);
                    }
                    map
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// ─── Order statistics ───────────────────────────────────────────────────────

fn bench_map_rank_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_rank_select");
    let keys = random_keys(N);
    let rb_map: RBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    group.bench_function(BenchmarkId::new("RBTreeMap::rank", N), |b| {
        b.iter(|| {
            for k in &keys {
                black_box(rb_map.rank(k));
            }
        });
    });

    group.bench_function(BenchmarkId::new("RBTreeMap::select", N), |b| {
        b.iter(|| {
            for i in 0..rb_map.len() {
                black_box(rb_map.select(i).ok());
            }
        });
    });

    // BTreeMap has no rank; counting a range is the nearest equivalent.
    group.bench_function(BenchmarkId::new("BTreeMap::range_count", N), |b| {
        b.iter(|| {
            for k in keys.iter().step_by(100) {
                black_box(bt_map.range(..k).count());
            }
        });
    });

    group.finish();
}

criterion_group!(map_crud_benches, bench_map_insert, bench_map_get, bench_map_remove,);

criterion_group!(order_statistic_benches, bench_map_rank_select,);

criterion_main!(map_crud_benches, order_statistic_benches);
