//! Rayon-based parallelisation utilities.
//!
//! This module provides order-preserving parallel maps for per-trade work.
//! Below [`ParallelConfig::parallel_threshold`] items are processed
//! sequentially; the thread pool is not worth it for small batches.

use rayon::prelude::*;

/// Minimum number of items a rayon task processes.
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Default item count at which processing goes parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100;

/// Configuration for parallel execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Minimum items per rayon task
    pub batch_size: usize,
    /// Minimum items before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Always-sequential configuration.
    pub fn sequential() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, usize::MAX)
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }

    /// Maps each item, preserving input order in the output.
    pub fn map<T, R, F>(&self, items: &[T], mapper: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        if self.should_parallelize(items.len()) {
            items
                .par_iter()
                .with_min_len(self.batch_size.max(1))
                .map(mapper)
                .collect()
        } else {
            items.iter().map(mapper).collect()
        }
    }

    /// Like [`map`](Self::map) but consumes the items.
    pub fn map_owned<T, R, F>(&self, items: Vec<T>, mapper: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Sync + Send,
    {
        if self.should_parallelize(items.len()) {
            items
                .into_par_iter()
                .with_min_len(self.batch_size.max(1))
                .map(mapper)
                .collect()
        } else {
            items.into_iter().map(mapper).collect()
        }
    }
}
