//! Bootstrap confidence interval estimation
//!
//! This crate estimates confidence intervals for arbitrary statistics by
//! nonparametric resampling:
//!
//! - **Resampling**: flat (row-level) or grouped (cluster-preserving) draws
//!   with replacement
//! - **Statistics**: any [`Statistic`] implementation; [`MeanStatistic`] and
//!   [`LinearRegressionStatistic`] are built in
//! - **Percentile intervals**: type 7 order-statistic interpolation over the
//!   empirical distribution
//!
//! # Overview
//!
//! Each replicate draws its own random stream from `(seed, replicate)`, so a
//! run is reproducible regardless of how replicates are scheduled. Samples on
//! which the statistic is undefined (e.g. a regression whose predictor has no
//! variance) are counted and skipped rather than aborting the run.
//!
//! # Examples
//!
//! ```rust
//! use resample_confidence::{
//!     Bootstrap, LinearRegressionStatistic, PercentileBootstrap, ResampleScheme,
//! };
//! use resample_core::{execution::sequential, DatasetBuilder};
//!
//! let x: Vec<f64> = (0..40).map(f64::from).collect();
//! let y: Vec<f64> = x.iter().enumerate()
//!     .map(|(i, xi)| 2.0 + 0.5 * xi + if i % 2 == 0 { 0.3 } else { -0.3 })
//!     .collect();
//! let subjects: Vec<String> = (0..40).map(|i| format!("s{}", i % 4)).collect();
//!
//! let data = DatasetBuilder::new()
//!     .column("x", x)
//!     .column("y", y)
//!     .group_key("subject", subjects)
//!     .build()
//!     .unwrap();
//!
//! let result = Bootstrap::new(sequential(), PercentileBootstrap)
//!     .with_scheme(ResampleScheme::grouped("subject"))
//!     .with_resamples(500)
//!     .with_seed(42)
//!     .confidence_intervals(&data, &LinearRegressionStatistic::new("y", "x"))
//!     .unwrap();
//!
//! let slope = result.intervals.get("slope").unwrap();
//! println!("95% CI for slope: [{:.3}, {:.3}]", slope.lower, slope.upper);
//! assert!(slope.contains(0.5));
//! ```

pub mod api;
mod bootstrap;
mod bootstrap_methods;
mod config;
mod distribution;
mod resampler;
mod statistic;
mod types;

// Re-exports
pub use api::{
    bootstrap_confidence_intervals, compute, confidence_interval, resample, run_bootstrap,
    DEFAULT_RESAMPLES, FAST_RESAMPLES, HIGH_PRECISION_RESAMPLES,
};
pub use bootstrap::{Bootstrap, BootstrapResult, BootstrapRun};
pub use bootstrap_methods::{estimate_intervals, quantile_type7, BootstrapMethod, PercentileBootstrap};
pub use config::BootstrapConfig;
pub use distribution::EmpiricalDistribution;
pub use resampler::{replicate_rng, ResampleScheme, Resampler};
pub use statistic::{
    statistic_fn, FnStatistic, LinearRegressionStatistic, MeanStatistic, Statistic,
};
pub use types::{ConfidenceInterval, ConfidenceLevel, IntervalSet, StatisticResult};
