//! Execution strategies for per-element stage work.
//!
//! Every stage of a [`Stream`](crate::Stream) that evaluates a callback once
//! per element goes through an [`Executor`]. The sequential executor is the
//! reference behavior; the parallel executor must produce the same output in
//! the same order.

mod parallel;
mod sequential;


use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use streamforge_config::{ExecutionMode, StreamConfig};

use crate::error::{Result, StreamError};

pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;

/// Strategy that runs per-element stage work.
///
/// Implementations must return results in input order and must evaluate
/// callbacks at most once per element.
pub trait Executor: Send + Sync + fmt::Debug {
    /// Returns true if work may run on more than one thread.
    fn is_parallel(&self) -> bool;

    /// Keeps the items matching `predicate`.
    fn filter<T, P>(&self, items: Vec<T>, predicate: &P) -> Vec<T>
    where
        T: Send,
        P: Fn(&T) -> bool + Sync;

    /// Transforms every item.
    fn map<T, U, F>(&self, items: Vec<T>, mapper: &F) -> Vec<U>
    where
        T: Send,
        U: Send,
        F: Fn(T) -> U + Sync;

    /// Transforms every item, stopping at the first failure.
    ///
    /// When several items fail, the error of the lowest index is returned.
    fn try_map<T, U, F>(&self, items: Vec<T>, mapper: &F) -> Result<Vec<U>>
    where
        T: Send,
        U: Send,
        F: Fn(T) -> Result<U> + Sync;

    /// Computes a value for every item without consuming it.
    fn map_ref<T, U, F>(&self, items: &[T], mapper: &F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Sync;

    /// Stable sort.
    fn sort_by<T, C>(&self, items: &mut [T], compare: &C)
    where
        T: Send,
        C: Fn(&T, &T) -> Ordering + Sync;
}

/// Execution mode of a stream.
///
/// `Parallel` holds the executor that runs the stream's stages; streams
/// derived from it share the same executor.
#[derive(Clone, Default)]
pub enum Mode {
    #[default]
    Sequential,
    Parallel(Arc<ParallelExecutor>),
}

impl Mode {
    /// Parallel mode on the process-wide rayon pool.
    pub fn parallel() -> Self {
        Mode::Parallel(Arc::new(ParallelExecutor::default()))
    }

    /// Builds the mode described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Config`](crate::StreamError::Config) if the
    /// configuration is invalid or the worker pool cannot be built.
    pub fn from_config(config: &StreamConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| StreamError::Config(e.to_string()))?;
        match config.default_mode {
            ExecutionMode::Sequential => Ok(Mode::Sequential),
            ExecutionMode::Parallel => Ok(Mode::Parallel(Arc::new(
                ParallelExecutor::from_config(&config.parallel)?,
            ))),
        }
    }

    pub fn is_parallel(&self) -> bool {
        matches!(self, Mode::Parallel(_))
    }
}

impl fmt::Debug for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Sequential => f.write_str("Sequential"),
            Mode::Parallel(executor) => f.debug_tuple("Parallel").field(executor).finish(),
        }
    }
}

/// Runs `$body` with `$exec` bound to the executor of `$mode`.
macro_rules! on_executor {
    ($mode:expr, $exec:ident => $body:expr) => {
        match $mode {
            $crate::executor::Mode::Sequential => {
                let $exec = &$crate::executor::SequentialExecutor;
                $body
            }
            $crate::executor::Mode::Parallel(parallel) => {
                let $exec = &**parallel;
                $body
            }
        }
    };
}

pub(crate) use on_executor;
