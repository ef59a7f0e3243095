//! Error types for bootstrap resampling
//!
//! Provides a unified error type for all resample-stats crates.

use thiserror::Error;

/// Core error type for resampling and interval estimation
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input data (empty dataset, missing column, non-finite value)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resampling scheme or statistic does not fit the dataset
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Statistic is undefined for this particular sample
    #[error("Singular input: {0}")]
    Singular(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Numerical computation error or statistic contract violation
    #[error("Computation error: {0}")]
    Computation(String),

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),

    /// Configuration (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether a bootstrap replicate failing with this error may be skipped
    ///
    /// Only singular samples are absorbed at the replicate boundary; every
    /// other kind aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Singular(_))
    }

    /// Create an error for empty input
    pub fn empty_input(operation: &str) -> Self {
        Self::InvalidInput(format!("{operation} requires at least one record"))
    }

    /// Create an error for a column the dataset does not carry
    pub fn missing_column(name: &str) -> Self {
        Self::InvalidInput(format!("Column '{name}' not found"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidInput(format!("{context} contains NaN or infinite values"))
    }

    /// Create an error for a confidence level outside (0, 1)
    pub fn invalid_confidence_level(level: f64) -> Self {
        Self::InvalidParameter(format!("Confidence level {level} must be in (0, 1)"))
    }
}
