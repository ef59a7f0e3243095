//! Bootstrap interval methods
//!
//! This module turns a bootstrap distribution into confidence intervals.
//! Only the percentile method is provided; its quantiles follow the
//! Hyndman–Fan type 7 definition (the default of R's `quantile()`), so bounds
//! can be checked value-for-value against reference output.

use crate::{
    distribution::EmpiricalDistribution,
    types::{ConfidenceInterval, ConfidenceLevel, IntervalSet},
};
use resample_core::{Error, Result};
use tracing::{debug, instrument};

/// Minimum number of replicates needed to interpolate a quantile pair
const MIN_REPLICATES: usize = 2;

/// Bootstrap method for calculating confidence intervals
///
/// This trait defines how to construct a confidence interval from
/// the bootstrap estimates of one statistic dimension.
pub trait BootstrapMethod: Clone + Send + Sync {
    /// Calculate confidence interval from bootstrap distribution
    fn calculate_interval(
        &self,
        bootstrap_estimates: &[f64],
        confidence_level: f64,
    ) -> Result<ConfidenceInterval>;

    /// Method name for documentation
    fn name(&self) -> &'static str;
}

/// Percentile bootstrap method
///
/// Uses the empirical percentiles of the bootstrap distribution directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentileBootstrap;

impl BootstrapMethod for PercentileBootstrap {
    fn calculate_interval(
        &self,
        bootstrap_estimates: &[f64],
        confidence_level: f64,
    ) -> Result<ConfidenceInterval> {
        let level = ConfidenceLevel::new(confidence_level)?;
        if bootstrap_estimates.len() < MIN_REPLICATES {
            return Err(Error::InsufficientData {
                expected: MIN_REPLICATES,
                actual: bootstrap_estimates.len(),
            });
        }

        let mut sorted = bootstrap_estimates.to_vec();
        sorted.sort_by(f64::total_cmp);

        let p_lo = level.tail_probability();
        let p_hi = 1.0 - p_lo;

        Ok(ConfidenceInterval::new(
            quantile_type7(&sorted, p_lo)?,
            quantile_type7(&sorted, p_hi)?,
            confidence_level,
        ))
    }

    fn name(&self) -> &'static str {
        "Percentile Bootstrap"
    }
}

/// Type 7 sample quantile of ascending-sorted data
///
/// With `h = (n - 1) * p + 1` (1-indexed) and `lo = floor(h)`, the result is
/// `(1 - f) * x[lo] + f * x[lo + 1]` where `f = h - lo`. Interpolation is
/// skipped when `f` is zero or both neighbours are equal, matching R.
///
/// Fails with [`Error::InsufficientData`] on an empty slice and
/// [`Error::InvalidParameter`] when `p` is outside `[0, 1]`.
pub fn quantile_type7(sorted: &[f64], p: f64) -> Result<f64> {
    let n = sorted.len();
    if n == 0 {
        return Err(Error::InsufficientData {
            expected: 1,
            actual: 0,
        });
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::InvalidParameter(format!(
            "Quantile probability {p} must be in [0, 1]"
        )));
    }
    let index = 1.0 + (n - 1) as f64 * p;
    let lo = index.floor();
    let hi = index.ceil();

    let lo_idx = (lo as usize).clamp(1, n) - 1;
    let hi_idx = (hi as usize).clamp(1, n) - 1;
    let q = sorted[lo_idx];

    if index > lo && sorted[hi_idx] != q {
        let h = index - lo;
        Ok((1.0 - h) * q + h * sorted[hi_idx])
    } else {
        Ok(q)
    }
}

/// Compute an interval for every dimension of a bootstrap distribution
#[instrument(skip(method, distribution), fields(method = method.name(), n_replicates = distribution.len()))]
pub fn estimate_intervals<M: BootstrapMethod>(
    method: &M,
    distribution: &EmpiricalDistribution,
    confidence_level: f64,
) -> Result<IntervalSet> {
    ConfidenceLevel::new(confidence_level)?;
    if distribution.len() < MIN_REPLICATES {
        return Err(Error::InsufficientData {
            expected: MIN_REPLICATES,
            actual: distribution.len(),
        });
    }

    let entries = distribution
        .dimensions()
        .map(|(name, values)| {
            let ci = method.calculate_interval(values, confidence_level)?;
            debug!("{}: [{:.6}, {:.6}]", name, ci.lower, ci.upper);
            Ok((name.to_string(), ci))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(IntervalSet::from_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatisticResult;
    use approx::assert_relative_eq;

    #[test]
    fn test_type7_reference_values() {
        // R: quantile(1:1000, c(0.025, 0.975)) -> 25.975, 975.025
        let sorted: Vec<f64> = (1..=1000).map(|i| i as f64).collect();
        let ci = PercentileBootstrap.calculate_interval(&sorted, 0.95).unwrap();
        assert_relative_eq!(ci.lower, 25.975, epsilon = 1e-9);
        assert_relative_eq!(ci.upper, 975.025, epsilon = 1e-9);
        assert_eq!(ci.confidence_level, 0.95);
    }

    #[test]
    fn test_type7_small_samples() {
        // R: quantile(c(1, 2, 3, 4), c(0, 0.1, 0.5, 0.9, 1)) -> 1.0, 1.3, 2.5, 3.7, 4.0
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_type7(&sorted, 0.0).unwrap(), 1.0);
        assert_relative_eq!(quantile_type7(&sorted, 0.1).unwrap(), 1.3, epsilon = 1e-12);
        assert_relative_eq!(quantile_type7(&sorted, 0.5).unwrap(), 2.5, epsilon = 1e-12);
        assert_relative_eq!(quantile_type7(&sorted, 0.9).unwrap(), 3.7, epsilon = 1e-12);
        assert_eq!(quantile_type7(&sorted, 1.0).unwrap(), 4.0);

        assert_eq!(quantile_type7(&[5.0], 0.3).unwrap(), 5.0);
        assert_eq!(quantile_type7(&[2.0, 2.0, 2.0], 0.42).unwrap(), 2.0);
    }

    #[test]
    fn test_type7_rejects_empty_and_out_of_range() {
        match quantile_type7(&[], 0.5) {
            Err(Error::InsufficientData { expected, actual }) => {
                assert_eq!(expected, 1);
                assert_eq!(actual, 0);
            }
            other => panic!("expected InsufficientData, got {other:?}"),
        }
        assert!(matches!(
            quantile_type7(&[1.0, 2.0], 1.5),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            quantile_type7(&[1.0, 2.0], f64::NAN),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_unsorted_input_is_sorted_first() {
        let estimates = vec![10.0, 1.0, 7.0, 4.0, 2.0, 9.0, 3.0, 8.0, 5.0, 6.0];
        let ci = PercentileBootstrap.calculate_interval(&estimates, 0.90).unwrap();
        // h_lo = 9 * 0.05 + 1 = 1.45 -> 1.45; h_hi = 9 * 0.95 + 1 = 9.55 -> 9.55
        assert_relative_eq!(ci.lower, 1.45, epsilon = 1e-9);
        assert_relative_eq!(ci.upper, 9.55, epsilon = 1e-9);
    }

    #[test]
    fn test_insufficient_replicates() {
        let err = PercentileBootstrap.calculate_interval(&[1.0], 0.95).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientData { expected: 2, actual: 1 }
        ));
    }

    #[test]
    fn test_invalid_level() {
        let err = PercentileBootstrap
            .calculate_interval(&[1.0, 2.0, 3.0], 1.0)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn test_estimate_intervals_per_dimension() {
        let names: Vec<String> = vec!["intercept".into(), "slope".into()];
        let mut dist = EmpiricalDistribution::new(names.clone());
        for i in 1..=1000 {
            let v = i as f64;
            dist.push(StatisticResult::new(names.clone(), vec![v, -v]).unwrap())
                .unwrap();
        }

        let intervals = estimate_intervals(&PercentileBootstrap, &dist, 0.95).unwrap();
        let intercept = intervals.get("intercept").unwrap();
        let slope = intervals.get("slope").unwrap();
        assert_relative_eq!(intercept.lower, 25.975, epsilon = 1e-9);
        assert_relative_eq!(intercept.upper, 975.025, epsilon = 1e-9);
        assert_relative_eq!(slope.lower, -975.025, epsilon = 1e-9);
        assert_relative_eq!(slope.upper, -25.975, epsilon = 1e-9);
    }

    #[test]
    fn test_estimate_intervals_order_independent() {
        let names: Vec<String> = vec!["mean".into()];
        let values: Vec<f64> = (0..200).map(|i| ((i * 37) % 200) as f64 * 0.5).collect();

        let mut forward = EmpiricalDistribution::new(names.clone());
        let mut backward = EmpiricalDistribution::new(names.clone());
        for &v in &values {
            forward.push(StatisticResult::new(names.clone(), vec![v]).unwrap()).unwrap();
        }
        for &v in values.iter().rev() {
            backward.push(StatisticResult::new(names.clone(), vec![v]).unwrap()).unwrap();
        }

        assert_eq!(
            estimate_intervals(&PercentileBootstrap, &forward, 0.9).unwrap(),
            estimate_intervals(&PercentileBootstrap, &backward, 0.9).unwrap()
        );
    }

    #[test]
    fn test_estimate_intervals_empty_distribution() {
        let dist = EmpiricalDistribution::new(vec!["mean".to_string()]);
        assert!(matches!(
            estimate_intervals(&PercentileBootstrap, &dist, 0.95),
            Err(Error::InsufficientData { expected: 2, actual: 0 })
        ));
    }
}
