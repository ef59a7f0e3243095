//! Common types for bootstrap results and confidence intervals

use resample_core::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Named, ordered tuple of scalars produced by one statistic evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticResult {
    names: Arc<[String]>,
    values: Vec<f64>,
}

impl StatisticResult {
    /// Create a result, checking that every value has a name
    pub fn new(names: impl Into<Arc<[String]>>, values: Vec<f64>) -> Result<Self> {
        let names = names.into();
        if names.len() != values.len() {
            return Err(Error::Computation(format!(
                "Statistic produced {} values for {} dimensions",
                values.len(),
                names.len()
            )));
        }
        Ok(Self { names, values })
    }

    /// Dimension names
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Shared handle to the dimension names
    pub fn shared_names(&self) -> Arc<[String]> {
        Arc::clone(&self.names)
    }

    /// Values in dimension order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value of a named dimension
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }

    /// Number of dimensions
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the result has no dimensions
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub(crate) fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// A confidence interval with lower and upper bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    /// Lower bound of the interval
    pub lower: f64,
    /// Upper bound of the interval
    pub upper: f64,
    /// Confidence level (e.g., 0.95 for 95% CI)
    pub confidence_level: f64,
}

impl ConfidenceInterval {
    /// Create a new confidence interval
    pub fn new(lower: f64, upper: f64, confidence_level: f64) -> Self {
        Self {
            lower,
            upper,
            confidence_level,
        }
    }

    /// Width of the confidence interval
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Margin of error (half-width)
    pub fn margin_of_error(&self) -> f64 {
        self.width() / 2.0
    }

    /// Check if a value is contained in the interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Check if intervals overlap
    pub fn overlaps(&self, other: &ConfidenceInterval) -> bool {
        self.lower <= other.upper && other.lower <= self.upper
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}% CI: [{:.4}, {:.4}]",
            self.confidence_level * 100.0,
            self.lower,
            self.upper
        )
    }
}

/// Confidence level type with validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceLevel(f64);

impl ConfidenceLevel {
    /// Create a new confidence level
    ///
    /// Fails with [`Error::InvalidParameter`] unless `level` is in (0, 1).
    pub fn new(level: f64) -> Result<Self> {
        if level > 0.0 && level < 1.0 {
            Ok(Self(level))
        } else {
            Err(Error::invalid_confidence_level(level))
        }
    }

    /// Get the confidence level value
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Get the alpha level (1 - confidence level)
    pub fn alpha(&self) -> f64 {
        1.0 - self.0
    }

    /// Get the tail probability (alpha/2 for two-tailed)
    pub fn tail_probability(&self) -> f64 {
        self.alpha() / 2.0
    }

    /// Common confidence levels
    pub const NINETY: Self = Self(0.90);
    pub const NINETY_FIVE: Self = Self(0.95);
    pub const NINETY_NINE: Self = Self(0.99);
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = Error;

    fn try_from(level: f64) -> Result<Self> {
        Self::new(level)
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}

/// Per-dimension confidence intervals, in the statistic's dimension order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntervalSet {
    entries: Vec<(String, ConfidenceInterval)>,
}

impl IntervalSet {
    pub(crate) fn from_entries(entries: Vec<(String, ConfidenceInterval)>) -> Self {
        Self { entries }
    }

    /// Interval of a named dimension
    pub fn get(&self, name: &str) -> Option<&ConfidenceInterval> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, ci)| ci)
    }

    /// Iterate over `(dimension, interval)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfidenceInterval)> + '_ {
        self.entries.iter().map(|(n, ci)| (n.as_str(), ci))
    }

    /// Number of dimensions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, ci)) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{name}: {ci}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_interval() {
        let ci = ConfidenceInterval::new(2.0, 8.0, 0.95);

        assert_eq!(ci.width(), 6.0);
        assert_eq!(ci.margin_of_error(), 3.0);
        assert!(ci.contains(5.0));
        assert!(!ci.contains(1.0));
        assert!(!ci.contains(9.0));
    }

    #[test]
    fn test_overlap() {
        let ci1 = ConfidenceInterval::new(2.0, 6.0, 0.95);
        let ci2 = ConfidenceInterval::new(4.0, 8.0, 0.95);
        let ci3 = ConfidenceInterval::new(7.0, 9.0, 0.95);

        assert!(ci1.overlaps(&ci2));
        assert!(ci2.overlaps(&ci1));
        assert!(!ci1.overlaps(&ci3));
    }

    #[test]
    fn test_confidence_level() {
        let level = ConfidenceLevel::new(0.95).unwrap();
        assert_eq!(level.value(), 0.95);
        assert!((level.alpha() - 0.05).abs() < 1e-10);
        assert!((level.tail_probability() - 0.025).abs() < 1e-10);
        assert_eq!(ConfidenceLevel::NINETY_FIVE, level);
    }

    #[test]
    fn test_invalid_confidence_level() {
        for level in [0.0, 1.0, 1.5, -0.2, f64::NAN] {
            assert!(matches!(
                ConfidenceLevel::new(level),
                Err(Error::InvalidParameter(_))
            ));
        }
        assert!(ConfidenceLevel::try_from(0.9).is_ok());
    }

    #[test]
    fn test_display() {
        let ci = ConfidenceInterval::new(2.5, 7.5, 0.95);
        let display = format!("{}", ci);
        assert!(display.contains("95.0%"));
        assert!(display.contains("2.5000"));
        assert!(display.contains("7.5000"));

        assert_eq!(format!("{}", ConfidenceLevel::NINETY_NINE), "99.0%");
    }

    #[test]
    fn test_statistic_result() {
        let names: Vec<String> = vec!["intercept".into(), "slope".into()];
        let result = StatisticResult::new(names, vec![1.5, -0.5]).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.get("slope"), Some(-0.5));
        assert_eq!(result.get("missing"), None);
        let pairs: Vec<_> = result.iter().collect();
        assert_eq!(pairs, vec![("intercept", 1.5), ("slope", -0.5)]);
    }

    #[test]
    fn test_statistic_result_length_mismatch() {
        let names: Vec<String> = vec!["mean".into()];
        assert!(matches!(
            StatisticResult::new(names, vec![1.0, 2.0]),
            Err(Error::Computation(_))
        ));
    }

    #[test]
    fn test_interval_set() {
        let set = IntervalSet::from_entries(vec![
            ("intercept".to_string(), ConfidenceInterval::new(0.5, 1.5, 0.9)),
            ("slope".to_string(), ConfidenceInterval::new(1.8, 2.2, 0.9)),
        ]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("slope").unwrap().lower, 1.8);
        assert!(set.get("mean").is_none());
        let names: Vec<&str> = set.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["intercept", "slope"]);
        assert!(format!("{set}").contains("slope: 90.0% CI"));
    }
}
