//! Execution engines for controlling how bootstrap replicates are scheduled
//!
//! Replicates are independent of one another, so an engine only decides
//! whether a batch of them runs on the current thread or on a Rayon pool.
//!
//! # Design Philosophy
//!
//! - **Deterministic Collection**: Batch results always come back in index order
//! - **Thread Pool Integration**: Works with Rayon's global pool or a dedicated one
//! - **Composable**: Engines are passed to algorithms, never stored globally

#[cfg(feature = "parallel")]
use crate::Result;

/// Execution strategy for batch operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Process items sequentially
    Sequential,
    /// Process items in parallel
    Parallel,
}

/// Trait for execution engines that control how batches are performed
pub trait ExecutionEngine: Clone + Send + Sync {
    /// Execute a function in the engine's execution context
    fn execute<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send;

    /// Run `f` for every index in `0..count`, returning results in index order
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send;

    /// Fallible variant of [`execute_batch`](Self::execute_batch)
    ///
    /// Stops scheduling new items once any item fails and returns that error.
    /// Successful results come back in index order.
    fn try_execute_batch<F, R, E>(&self, count: usize, f: F) -> std::result::Result<Vec<R>, E>
    where
        F: Fn(usize) -> std::result::Result<R, E> + Sync + Send,
        R: Send,
        E: Send;

    /// Get the execution strategy
    fn strategy(&self) -> ExecutionStrategy;

    /// Check if parallel execution is available
    fn is_parallel(&self) -> bool {
        self.strategy() == ExecutionStrategy::Parallel
    }

    /// Get the number of threads available
    fn num_threads(&self) -> usize;
}

/// Sequential execution engine
///
/// Executes all operations sequentially in the current thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialEngine;

impl SequentialEngine {
    /// Create a new sequential engine
    pub fn new() -> Self {
        Self
    }
}

impl ExecutionEngine for SequentialEngine {
    fn execute<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        f()
    }

    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        (0..count).map(f).collect()
    }

    fn try_execute_batch<F, R, E>(&self, count: usize, f: F) -> std::result::Result<Vec<R>, E>
    where
        F: Fn(usize) -> std::result::Result<R, E> + Sync + Send,
        R: Send,
        E: Send,
    {
        (0..count).map(f).collect()
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Sequential
    }

    fn num_threads(&self) -> usize {
        1
    }
}

/// Parallel execution engine using Rayon
///
/// Executes operations in parallel using Rayon's thread pool.
#[cfg(feature = "parallel")]
#[derive(Clone, Debug, Default)]
pub struct ParallelEngine {
    thread_pool: Option<std::sync::Arc<rayon::ThreadPool>>,
}

#[cfg(feature = "parallel")]
impl ParallelEngine {
    /// Create a new parallel engine with the global thread pool
    pub fn new() -> Self {
        Self { thread_pool: None }
    }

    /// Create a new parallel engine with a custom thread pool
    pub fn with_thread_pool(pool: std::sync::Arc<rayon::ThreadPool>) -> Self {
        Self {
            thread_pool: Some(pool),
        }
    }

    /// Create with a specific number of threads
    pub fn with_num_threads(num_threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| crate::Error::Execution(format!("Failed to create thread pool: {e}")))?;

        Ok(Self {
            thread_pool: Some(std::sync::Arc::new(pool)),
        })
    }
}

#[cfg(feature = "parallel")]
impl ExecutionEngine for ParallelEngine {
    fn execute<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.thread_pool {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }

    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        use rayon::prelude::*;

        match &self.thread_pool {
            Some(pool) => pool.install(|| (0..count).into_par_iter().map(f).collect()),
            None => (0..count).into_par_iter().map(f).collect(),
        }
    }

    fn try_execute_batch<F, R, E>(&self, count: usize, f: F) -> std::result::Result<Vec<R>, E>
    where
        F: Fn(usize) -> std::result::Result<R, E> + Sync + Send,
        R: Send,
        E: Send,
    {
        use rayon::prelude::*;

        match &self.thread_pool {
            Some(pool) => pool.install(|| (0..count).into_par_iter().map(f).collect()),
            None => (0..count).into_par_iter().map(f).collect(),
        }
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Parallel
    }

    fn num_threads(&self) -> usize {
        match &self.thread_pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }
}

/// Create a sequential engine
pub fn sequential() -> SequentialEngine {
    SequentialEngine::new()
}

/// Create a parallel engine on Rayon's global pool
#[cfg(feature = "parallel")]
pub fn parallel() -> ParallelEngine {
    ParallelEngine::new()
}

/// Create the best engine available for this build
#[cfg(feature = "parallel")]
pub fn auto_engine() -> ParallelEngine {
    parallel()
}

/// Create the best engine available for this build
#[cfg(not(feature = "parallel"))]
pub fn auto_engine() -> SequentialEngine {
    sequential()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_engine() {
        let engine = sequential();

        assert_eq!(engine.execute(|| 42), 42);

        let squares = engine.execute_batch(5, |i| i * i);
        assert_eq!(squares, vec![0, 1, 4, 9, 16]);

        assert_eq!(engine.strategy(), ExecutionStrategy::Sequential);
        assert!(!engine.is_parallel());
        assert_eq!(engine.num_threads(), 1);
    }

    #[test]
    fn test_sequential_try_batch_stops_at_first_error() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let engine = sequential();
        let calls = AtomicUsize::new(0);
        let result: std::result::Result<Vec<usize>, String> = engine.try_execute_batch(10, |i| {
            calls.fetch_add(1, Ordering::SeqCst);
            if i == 3 {
                Err(format!("failed at {i}"))
            } else {
                Ok(i)
            }
        });

        assert_eq!(result, Err("failed at 3".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 4);

        let ok: std::result::Result<Vec<usize>, String> = engine.try_execute_batch(4, Ok);
        assert_eq!(ok, Ok(vec![0, 1, 2, 3]));
    }

    #[test]
    fn test_auto_engine() {
        let engine = auto_engine();
        assert!(engine.num_threads() > 0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_engine_preserves_order() {
        let engine = parallel();

        let values = engine.execute_batch(1000, |i| i * 2);
        assert_eq!(values, (0..1000).map(|i| i * 2).collect::<Vec<_>>());

        let ok: std::result::Result<Vec<usize>, String> = engine.try_execute_batch(100, Ok);
        assert_eq!(ok, Ok((0..100).collect()));

        let err: std::result::Result<Vec<usize>, String> =
            engine.try_execute_batch(100, |i| if i == 50 { Err("boom".to_string()) } else { Ok(i) });
        assert!(err.is_err());

        assert_eq!(engine.strategy(), ExecutionStrategy::Parallel);
        assert!(engine.num_threads() > 0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_engine_dedicated_pool() {
        let engine = ParallelEngine::with_num_threads(2).unwrap();
        assert_eq!(engine.num_threads(), 2);
        let sum: usize = engine.execute(|| engine.execute_batch(10, |i| i).into_iter().sum());
        assert_eq!(sum, 45);
    }
}
