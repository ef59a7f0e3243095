//! Statistics evaluated on each bootstrap sample
//!
//! A [`Statistic`] maps a dataset to a fixed set of named scalars. The driver
//! only relies on this trait, so callers can plug in anything from a simple
//! mean to a model fit. Two built-ins are provided: [`MeanStatistic`] and
//! [`LinearRegressionStatistic`].

use crate::types::StatisticResult;
use resample_core::{Dataset, Error, Result};
use std::sync::Arc;


/// A statistic computed over a dataset
///
/// Implementations must be pure: the same sample always produces the same
/// result, and every result carries exactly [`dimension_names`](Self::dimension_names).
/// Returning [`Error::Singular`] marks a sample on which the statistic is
/// undefined; the bootstrap driver skips such replicates instead of failing.
pub trait Statistic: Send + Sync {
    /// Names of the scalars this statistic produces, in order
    fn dimension_names(&self) -> Vec<String>;

    /// Columns that must be present in the dataset
    fn required_columns(&self) -> Vec<&str>;

    /// Evaluate the statistic on a sample
    fn compute(&self, sample: &Dataset) -> Result<StatisticResult>;
}

impl<S: Statistic + ?Sized> Statistic for &S {
    fn dimension_names(&self) -> Vec<String> {
        (**self).dimension_names()
    }

    fn required_columns(&self) -> Vec<&str> {
        (**self).required_columns()
    }

    fn compute(&self, sample: &Dataset) -> Result<StatisticResult> {
        (**self).compute(sample)
    }
}

impl<S: Statistic + ?Sized> Statistic for Box<S> {
    fn dimension_names(&self) -> Vec<String> {
        (**self).dimension_names()
    }

    fn required_columns(&self) -> Vec<&str> {
        (**self).required_columns()
    }

    fn compute(&self, sample: &Dataset) -> Result<StatisticResult> {
        (**self).compute(sample)
    }
}

fn shared_names(names: &[&str]) -> Arc<[String]> {
    names.iter().map(|n| n.to_string()).collect::<Vec<_>>().into()
}

/// Arithmetic mean of one column
#[derive(Debug, Clone)]
pub struct MeanStatistic {
    column: String,
    names: Arc<[String]>,
}

impl MeanStatistic {
    /// Mean of the named column
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            names: shared_names(&["mean"]),
        }
    }
}

impl Statistic for MeanStatistic {
    fn dimension_names(&self) -> Vec<String> {
        self.names.to_vec()
    }

    fn required_columns(&self) -> Vec<&str> {
        vec![self.column.as_str()]
    }

    fn compute(&self, sample: &Dataset) -> Result<StatisticResult> {
        if sample.is_empty() {
            return Err(Error::empty_input("Mean"));
        }
        let values = sample.column(&self.column)?;
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        StatisticResult::new(Arc::clone(&self.names), vec![mean])
    }
}

/// Ordinary least squares fit of `response = intercept + slope * predictor`
///
/// Uses the centered closed form `slope = Sxy / Sxx`, which avoids forming
/// the normal equations directly.
#[derive(Debug, Clone)]
pub struct LinearRegressionStatistic {
    response: String,
    predictor: String,
    names: Arc<[String]>,
}

impl LinearRegressionStatistic {
    /// Regress `response` on `predictor`
    pub fn new(response: impl Into<String>, predictor: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            predictor: predictor.into(),
            names: shared_names(&["intercept", "slope"]),
        }
    }
}

impl Statistic for LinearRegressionStatistic {
    fn dimension_names(&self) -> Vec<String> {
        self.names.to_vec()
    }

    fn required_columns(&self) -> Vec<&str> {
        vec![self.response.as_str(), self.predictor.as_str()]
    }

    fn compute(&self, sample: &Dataset) -> Result<StatisticResult> {
        if sample.is_empty() {
            return Err(Error::empty_input("Linear regression"));
        }
        let x = sample.column(&self.predictor)?;
        let y = sample.column(&self.response)?;
        let n = x.len() as f64;

        let x_mean = x.iter().sum::<f64>() / n;
        let y_mean = y.iter().sum::<f64>() / n;

        let (sxx, sxy) = x.iter().zip(y).fold((0.0, 0.0), |(sxx, sxy), (&xi, &yi)| {
            let dx = xi - x_mean;
            (sxx + dx * dx, sxy + dx * (yi - y_mean))
        });
        // Rounding in the mean leaves up to n * eps * max|x| in each deviation;
        // Sxx at or below that floor is a constant predictor
        let max_abs = x.iter().fold(0.0f64, |m, xi| m.max(xi.abs()));
        let noise_floor = n * (n * f64::EPSILON * max_abs).powi(2);
        let constant = x.iter().all(|&xi| xi == x[0]);

        if constant || sxx <= noise_floor {
            return Err(Error::Singular(format!(
                "Predictor '{}' has zero variance in the sample",
                self.predictor
            )));
        }

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;
        StatisticResult::new(Arc::clone(&self.names), vec![intercept, slope])
    }
}

/// Statistic backed by a closure
pub struct FnStatistic<F> {
    names: Arc<[String]>,
    columns: Vec<String>,
    f: F,
}

impl<F> Statistic for FnStatistic<F>
where
    F: Fn(&Dataset) -> Result<Vec<f64>> + Send + Sync,
{
    fn dimension_names(&self) -> Vec<String> {
        self.names.to_vec()
    }

    fn required_columns(&self) -> Vec<&str> {
        self.columns.iter().map(String::as_str).collect()
    }

    fn compute(&self, sample: &Dataset) -> Result<StatisticResult> {
        let values = (self.f)(sample)?;
        StatisticResult::new(Arc::clone(&self.names), values)
    }
}

/// Build a statistic from a closure
///
/// # Example
/// ```rust
/// use resample_confidence::{statistic_fn, Statistic};
/// use resample_core::Dataset;
///
/// let max = statistic_fn(&["max"], &["x"], |sample: &Dataset| {
///     let x = sample.column("x")?;
///     Ok(vec![x.iter().cloned().fold(f64::MIN, f64::max)])
/// });
///
/// let data = Dataset::from_columns(vec![("x", vec![1.0, 7.0, 3.0])]).unwrap();
/// assert_eq!(max.compute(&data).unwrap().get("max"), Some(7.0));
/// ```
pub fn statistic_fn<F>(names: &[&str], columns: &[&str], f: F) -> FnStatistic<F>
where
    F: Fn(&Dataset) -> Result<Vec<f64>> + Send + Sync,
{
    FnStatistic {
        names: shared_names(names),
        columns: columns.iter().map(|c| c.to_string()).collect(),
        f,
    }
}
