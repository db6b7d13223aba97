//! Shared criterion presets and seeded workloads for the graph benches.

use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SMALL_RUNTIME_SAMPLE_SIZE: usize = 15;
const SMALL_RUNTIME_WARM_UP_MS: u64 = 100;
const SMALL_RUNTIME_MEASURE_MS: u64 = 200;
const MEDIUM_RUNTIME_SAMPLE_SIZE: usize = 15;
const MEDIUM_RUNTIME_WARM_UP_MS: u64 = 500;
const MEDIUM_RUNTIME_MEASURE_MS: u64 = 1000;
const LARGE_RUNTIME_SAMPLE_SIZE: usize = 10;
const LARGE_RUNTIME_WARM_UP_MS: u64 = 800;
const LARGE_RUNTIME_MEASURE_MS: u64 = 1500;
const RNG_SEED: u64 = 0x5EED_2026;
const WEIGHT_RANGE: std::ops::RangeInclusive<i64> = -1_000_000..=1_000_000;

pub fn apply_small_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(SMALL_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(SMALL_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(SMALL_RUNTIME_MEASURE_MS));
}

pub fn apply_medium_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(MEDIUM_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(MEDIUM_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(MEDIUM_RUNTIME_MEASURE_MS));
}

pub fn apply_large_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(LARGE_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(LARGE_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(LARGE_RUNTIME_MEASURE_MS));
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

/// Dense `n x n` weight matrix with `no_arc` on the diagonal and wherever
/// no arc was drawn. Each off-diagonal cell holds an arc with probability
/// `density`.
pub fn random_weight_matrix<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    density: f64,
    no_arc: i64,
) -> Vec<Vec<i64>> {
    let mut matrix = vec![vec![no_arc; n]; n];
    for (x, row) in matrix.iter_mut().enumerate() {
        for (y, cell) in row.iter_mut().enumerate() {
            if x != y && rng.random_bool(density) {
                *cell = rng.random_range(WEIGHT_RANGE);
            }
        }
    }
    matrix
}

/// `count` arcs `(from, to, weight)` over `0..n` with `from != to`.
/// Pairs may repeat.
pub fn random_arcs<R: Rng + ?Sized>(rng: &mut R, n: usize, count: usize) -> Vec<(usize, usize, i64)> {
    debug_assert!(n >= 2);
    let mut arcs = Vec::with_capacity(count);
    while arcs.len() < count {
        let from = rng.random_range(0..n);
        let to = rng.random_range(0..n);
        if from == to {
            continue;
        }
        arcs.push((from, to, rng.random_range(WEIGHT_RANGE)));
    }
    arcs
}
