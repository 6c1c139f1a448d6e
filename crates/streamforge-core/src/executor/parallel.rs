//! Rayon-backed executor.
//!
//! Work is split over rayon's indexed parallel iterators, so every output
//! slot is written by the unit that owns the matching input index and the
//! collected `Vec` comes back in input order.

use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use streamforge_config::{ParallelConfig, ThreadCount, DEFAULT_MIN_CHUNK_LEN};
use tracing::debug;

use super::Executor;
use crate::error::{Result, StreamError};

/// Fans per-element work out over a rayon pool.
///
/// Without a dedicated pool the process-wide rayon pool is used.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use streamforge_core::{ParallelExecutor, Stream};
///
/// let executor = Arc::new(ParallelExecutor::with_threads(2).unwrap());
/// let doubled = Stream::new_parallel_on(vec![1, 2, 3], executor)
///     .map(|v| v * 2)
///     .to_vec()
///     .unwrap();
/// assert_eq!(doubled, vec![2, 4, 6]);
/// ```
pub struct ParallelExecutor {
    pool: Option<ThreadPool>,
    min_chunk_len: usize,
}

impl ParallelExecutor {
    /// Creates an executor on the process-wide rayon pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an executor with a dedicated pool of `threads` workers.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Config`] if `threads` is zero or the pool
    /// cannot be spawned.
    pub fn with_threads(threads: usize) -> Result<Self> {
        Self::from_config(&ParallelConfig {
            thread_count: ThreadCount::Count(threads),
            ..ParallelConfig::default()
        })
    }

    /// Builds an executor from configuration.
    pub fn from_config(config: &ParallelConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| StreamError::Config(e.to_string()))?;

        let pool = match &config.thread_count {
            ThreadCount::Auto => None,
            ThreadCount::Count(threads) => {
                Some(build_pool(*threads, config.thread_name_prefix.clone())?)
            }
        };
        let executor = Self {
            pool,
            min_chunk_len: config.chunk_len(),
        };

        debug!(
            threads = executor.num_threads(),
            min_chunk_len = executor.min_chunk_len,
            dedicated_pool = executor.pool.is_some(),
            "Built parallel executor"
        );
        Ok(executor)
    }

    /// Sets the minimum number of elements handed to one work unit.
    pub fn with_min_chunk_len(mut self, len: usize) -> Self {
        self.min_chunk_len = len.max(1);
        self
    }

    /// Returns the minimum number of elements per work unit.
    pub fn min_chunk_len(&self) -> usize {
        self.min_chunk_len
    }

    /// Returns the number of worker threads available to this executor.
    pub fn num_threads(&self) -> usize {
        self.pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, ThreadPool::current_num_threads)
    }

    fn install<R, OP>(&self, op: OP) -> R
    where
        R: Send,
        OP: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

impl Default for ParallelExecutor {
    fn default() -> Self {
        Self {
            pool: None,
            min_chunk_len: DEFAULT_MIN_CHUNK_LEN,
        }
    }
}

impl Debug for ParallelExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParallelExecutor")
            .field("threads", &self.num_threads())
            .field("min_chunk_len", &self.min_chunk_len)
            .field("dedicated_pool", &self.pool.is_some())
            .finish()
    }
}

impl Executor for ParallelExecutor {
    fn is_parallel(&self) -> bool {
        true
    }

    fn filter<T, P>(&self, items: Vec<T>, predicate: &P) -> Vec<T>
    where
        T: Send,
        P: Fn(&T) -> bool + Sync,
    {
        self.install(|| {
            items
                .into_par_iter()
                .with_min_len(self.min_chunk_len)
                .filter(|item| predicate(item))
                .collect()
        })
    }

    fn map<T, U, F>(&self, items: Vec<T>, mapper: &F) -> Vec<U>
    where
        T: Send,
        U: Send,
        F: Fn(T) -> U + Sync,
    {
        self.install(|| {
            items
                .into_par_iter()
                .with_min_len(self.min_chunk_len)
                .map(mapper)
                .collect()
        })
    }

    fn try_map<T, U, F>(&self, items: Vec<T>, mapper: &F) -> Result<Vec<U>>
    where
        T: Send,
        U: Send,
        F: Fn(T) -> Result<U> + Sync,
    {
        // Lowest index known to have failed; units past it are skipped.
        let failed_at = AtomicUsize::new(usize::MAX);

        let outcomes: Vec<Option<Result<U>>> = self.install(|| {
            items
                .into_par_iter()
                .enumerate()
                .with_min_len(self.min_chunk_len)
                .map(|(index, item)| {
                    if index > failed_at.load(AtomicOrdering::Relaxed) {
                        return None;
                    }
                    let outcome = mapper(item);
                    if outcome.is_err() {
                        failed_at.fetch_min(index, AtomicOrdering::Relaxed);
                    }
                    Some(outcome)
                })
                .collect()
        });

        let mut mapped = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                Some(Ok(value)) => mapped.push(value),
                Some(Err(error)) => return Err(error),
                // Only units after a failed index are skipped, so the
                // failure is returned before a skipped slot is reached.
                None => continue,
            }
        }
        Ok(mapped)
    }

    fn map_ref<T, U, F>(&self, items: &[T], mapper: &F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Sync,
    {
        self.install(|| {
            items
                .par_iter()
                .with_min_len(self.min_chunk_len)
                .map(mapper)
                .collect()
        })
    }

    fn sort_by<T, C>(&self, items: &mut [T], compare: &C)
    where
        T: Send,
        C: Fn(&T, &T) -> Ordering + Sync,
    {
        self.install(|| items.par_sort_by(compare));
    }
}

fn build_pool(threads: usize, name_prefix: Option<String>) -> Result<ThreadPool> {
    let mut builder = ThreadPoolBuilder::new().num_threads(threads);
    if let Some(prefix) = name_prefix {
        builder = builder.thread_name(move |index| format!("{prefix}-{index}"));
    }
    builder
        .build()
        .map_err(|e| StreamError::Config(format!("failed to build worker pool: {e}")))
}
