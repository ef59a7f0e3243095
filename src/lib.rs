//! Nonparametric bootstrap confidence intervals
//!
//! Facade over the workspace crates:
//!
//! - [`resample_core`]: datasets, errors and execution engines
//! - [`resample_confidence`]: resampling schemes, statistics and percentile intervals
//!
//! The most common items are re-exported at the top level.
//!
//! ```rust
//! use resample_stats::{bootstrap_confidence_intervals, BootstrapConfig, Dataset, MeanStatistic};
//!
//! let data = Dataset::from_columns(vec![("x", vec![4.1, 3.9, 5.2, 4.8, 4.4, 5.0])]).unwrap();
//! let config = BootstrapConfig::new().with_resamples(2_000).with_seed(1);
//! let result = bootstrap_confidence_intervals(&data, &MeanStatistic::new("x"), &config).unwrap();
//! println!("{}", result.intervals);
//! ```

pub use resample_confidence;
pub use resample_core;

pub use resample_confidence::{
    bootstrap_confidence_intervals, confidence_interval, run_bootstrap, Bootstrap,
    BootstrapConfig, BootstrapResult, BootstrapRun, ConfidenceInterval, EmpiricalDistribution,
    IntervalSet, LinearRegressionStatistic, MeanStatistic, PercentileBootstrap, ResampleScheme,
    Statistic, StatisticResult,
};
pub use resample_core::{Dataset, DatasetBuilder, Error, Result};
