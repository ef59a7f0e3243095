//! High-level API for bootstrap confidence intervals
//!
//! This module provides clean, easy-to-use functions for the common
//! resample / run / estimate calls. They use the percentile method and the
//! best execution engine available in this build.

use crate::{
    bootstrap::{Bootstrap, BootstrapResult},
    bootstrap_methods::{estimate_intervals, PercentileBootstrap},
    config::BootstrapConfig,
    distribution::EmpiricalDistribution,
    resampler::{ResampleScheme, Resampler},
    statistic::Statistic,
    types::{IntervalSet, StatisticResult},
};
use rand::Rng;
use resample_core::{auto_engine, Dataset, Result};

/// Default number of bootstrap resamples
pub const DEFAULT_RESAMPLES: usize = 10_000;

/// Fast number of resamples for quick estimates
pub const FAST_RESAMPLES: usize = 1_000;

/// High-precision number of resamples
pub const HIGH_PRECISION_RESAMPLES: usize = 50_000;

/// Draw one bootstrap sample of `dataset`
pub fn resample<R: Rng + ?Sized>(
    dataset: &Dataset,
    scheme: &ResampleScheme,
    rng: &mut R,
) -> Result<Dataset> {
    Resampler::new(scheme.clone()).resample(dataset, rng)
}

/// Evaluate a statistic on a sample
pub fn compute<S: Statistic + ?Sized>(statistic: &S, sample: &Dataset) -> Result<StatisticResult> {
    statistic.compute(sample)
}

/// Run `replicate_count` bootstrap replicates
///
/// Returns the empirical distribution of the statistic together with the
/// number of replicates skipped because the statistic was undefined on their
/// sample.
///
/// # Example
/// ```rust
/// use resample_confidence::{run_bootstrap, confidence_interval, MeanStatistic, ResampleScheme};
/// use resample_core::Dataset;
///
/// let data = Dataset::from_columns(vec![("x", vec![1.0, 2.0, 3.0, 4.0, 5.0])]).unwrap();
/// let (distribution, failures) =
///     run_bootstrap(&data, &ResampleScheme::Flat, &MeanStatistic::new("x"), 2_000, 42).unwrap();
///
/// assert_eq!(failures, 0);
/// let intervals = confidence_interval(&distribution, 0.95).unwrap();
/// assert!(intervals.get("mean").unwrap().contains(3.0));
/// ```
pub fn run_bootstrap<S: Statistic + ?Sized>(
    dataset: &Dataset,
    scheme: &ResampleScheme,
    statistic: &S,
    replicate_count: usize,
    seed: u64,
) -> Result<(EmpiricalDistribution, usize)> {
    let run = Bootstrap::new(auto_engine(), PercentileBootstrap)
        .with_scheme(scheme.clone())
        .with_resamples(replicate_count)
        .with_seed(seed)
        .run(dataset, statistic)?;
    Ok(run.into_parts())
}

/// Percentile confidence interval of every dimension of a distribution
pub fn confidence_interval(distribution: &EmpiricalDistribution, level: f64) -> Result<IntervalSet> {
    estimate_intervals(&PercentileBootstrap, distribution, level)
}

/// Run the bootstrap described by `config` and derive intervals in one call
pub fn bootstrap_confidence_intervals<S: Statistic + ?Sized>(
    dataset: &Dataset,
    statistic: &S,
    config: &BootstrapConfig,
) -> Result<BootstrapResult> {
    Bootstrap::from_config(auto_engine(), PercentileBootstrap, config.clone())
        .confidence_intervals(dataset, statistic)
}
