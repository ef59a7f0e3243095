//! Core types for bootstrap resampling
//!
//! This crate provides the pieces every resampling computation builds on:
//!
//! - [`Dataset`]: immutable, schema-checked tabular data with an optional group key
//! - [`Error`]: the shared error taxonomy, including which failures a bootstrap
//!   replicate may recover from
//! - [`execution`]: engines that schedule independent replicates sequentially
//!   or on a Rayon pool
//!
//! # Example
//!
//! ```rust
//! use resample_core::{DatasetBuilder, execution::{sequential, ExecutionEngine}};
//!
//! let data = DatasetBuilder::new()
//!     .column("x", vec![1.0, 2.0, 3.0])
//!     .group_key("subject", vec!["a", "a", "b"])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(data.group_sizes(), vec![("a".to_string(), 2), ("b".to_string(), 1)]);
//!
//! let engine = sequential();
//! let doubled = engine.execute_batch(data.len(), |i| data.column("x").unwrap()[i] * 2.0);
//! assert_eq!(doubled, vec![2.0, 4.0, 6.0]);
//! ```

pub mod dataset;
pub mod error;
pub mod execution;

// Re-export core types
pub use dataset::{Dataset, DatasetBuilder, Group, Record};
pub use error::{Error, Result};
pub use execution::{auto_engine, sequential, ExecutionEngine, ExecutionStrategy, SequentialEngine};
#[cfg(feature = "parallel")]
pub use execution::{parallel, ParallelEngine};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
