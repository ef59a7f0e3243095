//! Empirical bootstrap distribution

use crate::types::StatisticResult;
use resample_core::{Error, Result};
use std::sync::Arc;

/// Statistic values collected over the successful replicates of a run
///
/// Values are stored per dimension. Replicate order is kept but carries no
/// meaning: everything derived from a distribution treats it as a multiset.
#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalDistribution {
    names: Arc<[String]>,
    dimensions: Vec<Vec<f64>>,
}

impl EmpiricalDistribution {
    /// Create an empty distribution for the given dimensions
    pub fn new(names: impl Into<Arc<[String]>>) -> Self {
        Self::with_capacity(names, 0)
    }

    /// Create an empty distribution with room for `capacity` replicates
    pub fn with_capacity(names: impl Into<Arc<[String]>>, capacity: usize) -> Self {
        let names = names.into();
        let dimensions = vec![Vec::with_capacity(capacity); names.len()];
        Self { names, dimensions }
    }

    /// Append one replicate's result
    ///
    /// Fails with [`Error::Computation`] if the result's dimensions differ from
    /// the distribution's.
    pub fn push(&mut self, result: StatisticResult) -> Result<()> {
        if result.names() != &*self.names {
            return Err(Error::Computation(format!(
                "Statistic produced dimensions {:?}, expected {:?}",
                result.names(),
                self.names
            )));
        }
        for (dimension, value) in self.dimensions.iter_mut().zip(result.into_values()) {
            dimension.push(value);
        }
        Ok(())
    }

    /// Append every replicate of another distribution over the same dimensions
    pub fn merge(&mut self, other: EmpiricalDistribution) -> Result<()> {
        if other.names != self.names {
            return Err(Error::Computation(format!(
                "Cannot merge distribution over {:?} into {:?}",
                other.names, self.names
            )));
        }
        for (dimension, values) in self.dimensions.iter_mut().zip(other.dimensions) {
            dimension.extend(values);
        }
        Ok(())
    }

    /// Number of replicates
    pub fn len(&self) -> usize {
        self.dimensions.first().map_or(0, Vec::len)
    }

    /// Whether no replicate has been recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimension names
    pub fn dimension_names(&self) -> &[String] {
        &self.names
    }

    /// Values of one dimension, in replicate order
    pub fn values(&self, name: &str) -> Result<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.dimensions[i].as_slice())
            .ok_or_else(|| Error::InvalidInput(format!("Unknown statistic dimension '{name}'")))
    }

    /// Iterate over `(name, values)` per dimension
    pub fn dimensions(&self) -> impl Iterator<Item = (&str, &[f64])> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.dimensions.iter().map(Vec::as_slice))
    }

    /// Values of replicate `index` across all dimensions
    pub fn replicate(&self, index: usize) -> Option<Vec<f64>> {
        (index < self.len()).then(|| self.dimensions.iter().map(|d| d[index]).collect())
    }

    /// Mean of one dimension over all replicates
    pub fn mean(&self, name: &str) -> Result<f64> {
        let values = self.values(name)?;
        if values.is_empty() {
            return Err(Error::InsufficientData {
                expected: 1,
                actual: 0,
            });
        }
        Ok(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Bootstrap standard error of one dimension (sample standard deviation)
    pub fn standard_error(&self, name: &str) -> Result<f64> {
        let values = self.values(name)?;
        if values.len() < 2 {
            return Err(Error::InsufficientData {
                expected: 2,
                actual: values.len(),
            });
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let variance = values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>()
            / (values.len() - 1) as f64;
        Ok(variance.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn result(list: &[&str], values: Vec<f64>) -> StatisticResult {
        StatisticResult::new(names(list), values).unwrap()
    }

    #[test]
    fn test_push_and_read() {
        let mut dist = EmpiricalDistribution::new(names(&["intercept", "slope"]));
        assert!(dist.is_empty());
        dist.push(result(&["intercept", "slope"], vec![1.0, 2.0])).unwrap();
        dist.push(result(&["intercept", "slope"], vec![3.0, 4.0])).unwrap();

        assert_eq!(dist.len(), 2);
        assert_eq!(dist.values("slope").unwrap(), &[2.0, 4.0]);
        assert_eq!(dist.replicate(1), Some(vec![3.0, 4.0]));
        assert_eq!(dist.replicate(2), None);
        assert!(dist.values("mean").is_err());

        let dims: Vec<_> = dist.dimensions().map(|(n, v)| (n, v.len())).collect();
        assert_eq!(dims, vec![("intercept", 2), ("slope", 2)]);
    }

    #[test]
    fn test_push_rejects_dimension_mismatch() {
        let mut dist = EmpiricalDistribution::new(names(&["mean"]));
        let err = dist.push(result(&["median"], vec![1.0])).unwrap_err();
        assert!(matches!(err, Error::Computation(_)));
        assert!(dist.is_empty());
    }

    #[test]
    fn test_merge() {
        let mut a = EmpiricalDistribution::new(names(&["mean"]));
        a.push(result(&["mean"], vec![1.0])).unwrap();
        let mut b = EmpiricalDistribution::new(names(&["mean"]));
        b.push(result(&["mean"], vec![2.0])).unwrap();
        b.push(result(&["mean"], vec![3.0])).unwrap();

        a.merge(b).unwrap();
        assert_eq!(a.values("mean").unwrap(), &[1.0, 2.0, 3.0]);

        let other = EmpiricalDistribution::new(names(&["slope"]));
        assert!(a.merge(other).is_err());
    }

    #[test]
    fn test_summaries() {
        let mut dist = EmpiricalDistribution::new(names(&["mean"]));
        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            dist.push(result(&["mean"], vec![v])).unwrap();
        }
        assert_relative_eq!(dist.mean("mean").unwrap(), 5.0);
        // Sample variance 32/7
        assert_relative_eq!(
            dist.standard_error("mean").unwrap(),
            (32.0f64 / 7.0).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_summaries_insufficient() {
        let mut dist = EmpiricalDistribution::new(names(&["mean"]));
        assert!(matches!(
            dist.mean("mean"),
            Err(Error::InsufficientData { expected: 1, actual: 0 })
        ));
        dist.push(result(&["mean"], vec![1.0])).unwrap();
        assert!(matches!(
            dist.standard_error("mean"),
            Err(Error::InsufficientData { expected: 2, actual: 1 })
        ));
    }
}
