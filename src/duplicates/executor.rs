//! Execution strategies for a batch of per-file work.
//!
//! # Overview
//!
//! A batch is either processed on the calling thread or fanned out over a
//! bounded rayon pool. The choice depends only on the batch size compared
//! to a threshold, see [`ExecutionStrategy::select`].
//!
//! Both strategies expose the same contract: map a function over every
//! input and collect every result. Nothing short-circuits; callers encode
//! per-item failures in the result type.
//!
//! # Example
//!
//! ```
//! use pixeldupe::duplicates::ExecutionStrategy;
//!
//! let strategy = ExecutionStrategy::select(10, 1000, 4);
//! assert_eq!(strategy, ExecutionStrategy::Sequential);
//!
//! let doubled = strategy.map(vec![1, 2, 3], |n| n * 2);
//! assert_eq!(doubled, vec![2, 4, 6]);
//! ```

use std::fmt;

use rayon::prelude::*;
use serde::Serialize;

/// Batches larger than this are processed in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// How a batch is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ExecutionStrategy {
    /// One item at a time on the calling thread, in input order.
    Sequential,
    /// A dedicated rayon pool of `threads` workers.
    Parallel {
        /// Pool size
        threads: usize,
    },
}

impl ExecutionStrategy {
    /// Pick a strategy for a batch of `batch_len` items.
    ///
    /// Parallel only when `batch_len` is strictly greater than `threshold`.
    /// A pool always has at least one worker.
    #[must_use]
    pub fn select(batch_len: usize, threshold: usize, threads: usize) -> Self {
        if batch_len > threshold {
            Self::Parallel {
                threads: threads.max(1),
            }
        } else {
            Self::Sequential
        }
    }

    /// Whether this strategy uses a worker pool.
    #[must_use]
    pub fn is_parallel(&self) -> bool {
        matches!(self, Self::Parallel { .. })
    }

    /// Apply `f` to every input and collect all results.
    ///
    /// Results come back in input order for both strategies; only the order
    /// in which `f` *runs* differs. If the pool cannot be built the batch
    /// runs sequentially instead.
    pub fn map<T, R, F>(&self, inputs: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Sync + Send,
    {
        match *self {
            Self::Sequential => inputs.into_iter().map(f).collect(),
            Self::Parallel { threads } => {
                match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                    Ok(pool) => {
                        log::debug!("Built worker pool with {} threads", threads);
                        pool.install(|| inputs.into_par_iter().map(f).collect())
                    }
                    Err(e) => {
                        log::warn!(
                            "Failed to create worker pool ({}), processing batch sequentially",
                            e
                        );
                        inputs.into_iter().map(f).collect()
                    }
                }
            }
        }
    }
}

impl fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Parallel { threads } => write!(f, "parallel ({} threads)", threads),
        }
    }
}

/// Number of worker threads to use when none is configured.
#[must_use]
pub fn default_threads() -> usize {
    rayon::current_num_threads().max(1)
}
