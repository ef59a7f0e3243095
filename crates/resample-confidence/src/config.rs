//! Configuration for bootstrap runs

use crate::{api::DEFAULT_RESAMPLES, resampler::ResampleScheme, types::ConfidenceLevel};
use resample_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Parameters of one bootstrap run
///
/// Deserializes from partial JSON; missing fields take their defaults.
///
/// ```rust
/// use resample_confidence::{BootstrapConfig, ResampleScheme};
///
/// let config = BootstrapConfig::from_json(
///     r#"{ "n_resamples": 2000, "seed": 7, "scheme": { "type": "grouped", "key": "subject" } }"#,
/// ).unwrap();
///
/// assert_eq!(config.n_resamples, 2000);
/// assert_eq!(config.confidence_level, 0.95);
/// assert_eq!(config.scheme, ResampleScheme::grouped("subject"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Number of replicates to draw
    pub n_resamples: usize,
    /// Confidence level of the derived intervals, in (0, 1)
    pub confidence_level: f64,
    /// Base seed; a random one is drawn per run when absent
    pub seed: Option<u64>,
    /// Resampling scheme
    pub scheme: ResampleScheme,
    /// Fraction of failed replicates above which the run is flagged
    pub max_failure_rate: Option<f64>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            n_resamples: DEFAULT_RESAMPLES,
            confidence_level: 0.95,
            seed: None,
            scheme: ResampleScheme::Flat,
            max_failure_rate: None,
        }
    }
}

impl BootstrapConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of bootstrap resamples
    pub fn with_resamples(mut self, n_resamples: usize) -> Self {
        self.n_resamples = n_resamples;
        self
    }

    /// Set the confidence level
    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the resampling scheme
    pub fn with_scheme(mut self, scheme: ResampleScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Flag runs whose failed-replicate fraction exceeds `rate`
    pub fn with_max_failure_rate(mut self, rate: f64) -> Self {
        self.max_failure_rate = Some(rate);
        self
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        if self.n_resamples == 0 {
            return Err(Error::InvalidParameter(
                "Number of resamples must be positive".to_string(),
            ));
        }
        ConfidenceLevel::new(self.confidence_level)?;
        if let Some(rate) = self.max_failure_rate {
            if !(0.0..=1.0).contains(&rate) {
                return Err(Error::InvalidParameter(format!(
                    "Maximum failure rate {rate} must be in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
