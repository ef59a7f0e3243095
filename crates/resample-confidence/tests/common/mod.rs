//! Shared utilities for integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use resample_core::{Dataset, DatasetBuilder};

/// Dataset with one column `x` holding `values`
pub fn single_column(values: Vec<f64>) -> Dataset {
    Dataset::from_columns(vec![("x", values)]).unwrap()
}

/// Grouped dataset with one normal column per group
///
/// Group `g{i}` has `sizes[i]` rows drawn from N(`means[i]`, 1).
pub fn grouped_normal(sizes: &[usize], means: &[f64], seed: u64) -> Dataset {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut values = Vec::new();
    let mut labels = Vec::new();
    for (i, (&size, &mean)) in sizes.iter().zip(means).enumerate() {
        let normal = Normal::new(mean, 1.0).unwrap();
        for _ in 0..size {
            values.push(normal.sample(&mut rng));
            labels.push(format!("g{i}"));
        }
    }
    DatasetBuilder::new()
        .column("x", values)
        .group_key("group", labels)
        .build()
        .unwrap()
}

/// Noisy linear data `y = intercept + slope * x + N(0, noise)`
pub fn linear(n: usize, intercept: f64, slope: f64, noise: f64, seed: u64) -> Dataset {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = Normal::new(0.0, noise).unwrap();
    let x: Vec<f64> = (0..n).map(|i| i as f64 / n as f64 * 10.0).collect();
    let y: Vec<f64> = x
        .iter()
        .map(|xi| intercept + slope * xi + normal.sample(&mut rng))
        .collect();
    Dataset::from_columns(vec![("x", x), ("y", y)]).unwrap()
}

/// Mean of a slice
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Install a test subscriber honoring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
