//! Bootstrap driver
//!
//! This module runs `R` independent replicates of resample-then-evaluate and
//! collects the results into an [`EmpiricalDistribution`]:
//! - Each replicate draws from its own `(seed, replicate)` random stream
//! - Replicates are scheduled on an [`ExecutionEngine`], sequential or parallel
//! - Singular samples are counted and skipped; any other error aborts the run

use crate::{
    bootstrap_methods::{estimate_intervals, BootstrapMethod},
    config::BootstrapConfig,
    distribution::EmpiricalDistribution,
    resampler::{replicate_rng, ResampleScheme, Resampler},
    statistic::Statistic,
    types::{IntervalSet, StatisticResult},
};
use rand::prelude::*;
use resample_core::{execution::ExecutionEngine, Dataset, Error, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument, trace, warn};

/// Outcome of a bootstrap run
#[derive(Debug, Clone)]
pub struct BootstrapRun {
    /// Statistic values of the successful replicates
    pub distribution: EmpiricalDistribution,
    /// Replicates skipped because the statistic was undefined on their sample
    pub failure_count: usize,
    /// Replicates attempted
    pub n_resamples: usize,
    /// Seed the replicate streams were derived from
    pub seed: u64,
    /// Statistic on the full dataset, `None` if it is singular there
    pub point_estimate: Option<StatisticResult>,
    /// Whether the failure rate exceeded the configured maximum
    pub threshold_exceeded: bool,
    /// Wall time of the run
    pub elapsed_ms: u64,
}

impl BootstrapRun {
    /// Replicates that contributed to the distribution
    pub fn success_count(&self) -> usize {
        self.n_resamples - self.failure_count
    }

    /// Fraction of replicates that failed
    pub fn failure_rate(&self) -> f64 {
        self.failure_count as f64 / self.n_resamples as f64
    }

    /// Split into the distribution and the failure count
    pub fn into_parts(self) -> (EmpiricalDistribution, usize) {
        (self.distribution, self.failure_count)
    }
}

/// Result of bootstrap confidence interval estimation
#[derive(Debug, Clone)]
pub struct BootstrapResult {
    /// The confidence interval of every statistic dimension
    pub intervals: IntervalSet,
    /// The underlying run
    pub run: BootstrapRun,
}

/// Main bootstrap engine
///
/// Holds the execution engine, the interval method and the run
/// configuration. The dataset and statistic are passed per call so one
/// driver can serve many analyses.
#[derive(Clone)]
pub struct Bootstrap<E, M> {
    engine: E,
    method: M,
    config: BootstrapConfig,
}

impl<E, M> Bootstrap<E, M>
where
    E: ExecutionEngine,
    M: BootstrapMethod,
{
    /// Create a new bootstrap driver with the default configuration
    pub fn new(engine: E, method: M) -> Self {
        Self::from_config(engine, method, BootstrapConfig::default())
    }

    /// Create a bootstrap driver from an explicit configuration
    pub fn from_config(engine: E, method: M, config: BootstrapConfig) -> Self {
        Self {
            engine,
            method,
            config,
        }
    }

    /// Set the number of bootstrap resamples
    pub fn with_resamples(mut self, n_resamples: usize) -> Self {
        self.config.n_resamples = n_resamples;
        self
    }

    /// Set the confidence level
    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.config.confidence_level = confidence_level;
        self
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the resampling scheme
    pub fn with_scheme(mut self, scheme: ResampleScheme) -> Self {
        self.config.scheme = scheme;
        self
    }

    /// Flag runs whose failed-replicate fraction exceeds `rate`
    pub fn with_max_failure_rate(mut self, rate: f64) -> Self {
        self.config.max_failure_rate = Some(rate);
        self
    }

    /// The active configuration
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Run all replicates and collect the empirical distribution
    ///
    /// Scheme and column requirements are checked against `dataset` before
    /// any replicate is drawn.
    #[instrument(skip(self, dataset, statistic),
                 fields(n = dataset.len(), n_resamples = self.config.n_resamples, scheme = self.config.scheme.name()))]
    pub fn run<S>(&self, dataset: &Dataset, statistic: &S) -> Result<BootstrapRun>
    where
        S: Statistic + ?Sized,
    {
        self.config.validate()?;
        self.config.scheme.validate_for(dataset)?;
        dataset.require_columns(&statistic.required_columns())?;

        let start_time = std::time::Instant::now();
        let seed = self.config.seed.unwrap_or_else(|| thread_rng().gen());
        let names: Arc<[String]> = statistic.dimension_names().into();
        let n_resamples = self.config.n_resamples;

        let point_estimate = match statistic.compute(dataset) {
            Ok(estimate) if estimate.names() != &*names => {
                return Err(Error::Computation(format!(
                    "Statistic produced dimensions {:?}, expected {:?}",
                    estimate.names(),
                    names
                )))
            }
            Ok(estimate) => Some(estimate),
            Err(e) if e.is_recoverable() => {
                debug!("Statistic undefined on the full dataset: {}", e);
                None
            }
            Err(e) => return Err(e),
        };

        debug!("Running {} replicates with seed {}", n_resamples, seed);

        let resampler = Resampler::new(self.config.scheme.clone());
        let outcomes = self.engine.try_execute_batch(n_resamples, |i| -> Result<Option<StatisticResult>> {
            let mut rng = replicate_rng(seed, i);
            let sample = resampler.resample(dataset, &mut rng)?;
            match statistic.compute(&sample) {
                Ok(result) => Ok(Some(result)),
                Err(e) if e.is_recoverable() => {
                    trace!(replicate = i, "Skipping replicate: {}", e);
                    Ok(None)
                }
                Err(e) => Err(e),
            }
        })?;

        let mut distribution = EmpiricalDistribution::with_capacity(names, n_resamples);
        let mut failure_count = 0;
        for outcome in outcomes {
            match outcome {
                Some(result) => distribution.push(result)?,
                None => failure_count += 1,
            }
        }

        let failure_rate = failure_count as f64 / n_resamples as f64;
        let threshold_exceeded = self
            .config
            .max_failure_rate
            .is_some_and(|max| failure_rate > max);

        if threshold_exceeded {
            warn!(
                "{} of {} replicates failed ({:.1}%), above the {:.1}% limit",
                failure_count,
                n_resamples,
                failure_rate * 100.0,
                self.config.max_failure_rate.unwrap_or_default() * 100.0
            );
        } else if failure_count > 0 && self.config.max_failure_rate.is_none() {
            warn!("{} of {} replicates failed and were skipped", failure_count, n_resamples);
        } else if failure_count > 0 {
            debug!("{} of {} replicates failed and were skipped", failure_count, n_resamples);
        }

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Bootstrap completed: {} replicates kept in {} ms",
            distribution.len(),
            elapsed_ms
        );

        Ok(BootstrapRun {
            distribution,
            failure_count,
            n_resamples,
            seed,
            point_estimate,
            threshold_exceeded,
            elapsed_ms,
        })
    }

    /// Run the bootstrap and derive confidence intervals
    pub fn confidence_intervals<S>(&self, dataset: &Dataset, statistic: &S) -> Result<BootstrapResult>
    where
        S: Statistic + ?Sized,
    {
        let run = self.run(dataset, statistic)?;

        debug!("Bootstrap completed, calculating confidence intervals");

        let intervals = estimate_intervals(
            &self.method,
            &run.distribution,
            self.config.confidence_level,
        )?;
        Ok(BootstrapResult { intervals, run })
    }
}
