//! Chainable stream pipelines.
//!
//! A [`Stream`] is an ordered, finite sequence of elements plus an execution
//! [`Mode`]. Every operation consumes the stream and returns a new one, so
//! chains read left to right:
//!
//! ```
//! use streamforge_core::Stream;
//!
//! let result = Stream::new_sequential(vec![1, 2, 3])
//!     .filter(|v| *v == 2)
//!     .map(|v| v * 2)
//!     .to_vec()
//!     .unwrap();
//! assert_eq!(result, vec![4]);
//! ```
//!
//! # Failure
//!
//! A stream is either ready (holds elements) or failed (holds a
//! [`StreamError`]). Once a stage fails, every later operation on the
//! stream is a pass-through: same-type operations return the identical
//! handle, type-changing operations return a new failed stream carrying the
//! same error and mode, and terminal operations return the error.
//!
//! ```
//! use streamforge_core::{Stream, StreamError};
//!
//! let stream = Stream::new_sequential(vec![1, 2, 3]).limit(-1);
//! assert!(matches!(stream.err(), Some(StreamError::InvalidArgument { .. })));
//!
//! let result = stream.map(|v| v + 1).sorted(|a, b| a < b).to_vec();
//! assert!(result.is_err());
//! ```
//!
//! # Execution
//!
//! Sequential streams run each stage on the caller's thread as it is
//! invoked. Parallel streams run per-element stages (`filter`, `map`,
//! `flat_map`, `map_to_int`, `map_to_f64`, key extraction for `distinct`) on
//! their [`ParallelExecutor`] and wait for every unit before returning.
//! Both modes produce the same elements in the same order.

mod order;
mod terminal;
mod transform;

#[cfg(test)]
mod tests;

use std::any::Any;
use std::fmt::{self, Debug};
use std::sync::Arc;

use streamforge_config::StreamConfig;
use tracing::{debug, trace};

use crate::element::{Item, TypeTag};
use crate::error::{Result, StreamError};
use crate::executor::{Mode, ParallelExecutor};
use crate::source;

/// Ordered, finite pipeline over elements of type `T`.
///
/// Cloning a stream clones the handle, not the elements.
pub struct Stream<T> {
    inner: Arc<Inner<T>>,
}

#[derive(Clone)]
struct Inner<T> {
    mode: Mode,
    state: State<T>,
}

#[derive(Clone)]
enum State<T> {
    Ready(Vec<T>),
    Failed(StreamError),
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Item> Stream<T> {
    /// Creates a stream over `items` in the given mode.
    pub fn new(items: impl IntoIterator<Item = T>, mode: Mode) -> Self {
        Self::ready(mode, items.into_iter().collect())
    }

    /// Creates a sequential stream over `items`.
    pub fn new_sequential(items: impl IntoIterator<Item = T>) -> Self {
        Self::new(items, Mode::Sequential)
    }

    /// Creates a parallel stream over `items` on the process-wide rayon pool.
    pub fn new_parallel(items: impl IntoIterator<Item = T>) -> Self {
        Self::new(items, Mode::parallel())
    }

    /// Creates a parallel stream over `items` running on `executor`.
    pub fn new_parallel_on(
        items: impl IntoIterator<Item = T>,
        executor: Arc<ParallelExecutor>,
    ) -> Self {
        Self::new(items, Mode::Parallel(executor))
    }

    /// Creates a stream over `items` in the mode described by `config`.
    ///
    /// An invalid configuration yields a failed sequential stream.
    pub fn with_config(items: impl IntoIterator<Item = T>, config: &StreamConfig) -> Self {
        match Mode::from_config(config) {
            Ok(mode) => Self::new(items, mode),
            Err(error) => Self::fail_stage("config", Mode::Sequential, error),
        }
    }

    /// Creates a sequential stream from a dynamically typed source.
    ///
    /// Accepted sources are `Vec<T>`, `VecDeque<T>`, `Box<[T]>`,
    /// `&'static [T]` and `Option<Vec<T>>` (`None` yields an empty stream).
    /// Anything else yields a failed sequential stream holding
    /// [`StreamError::SourceType`].
    ///
    /// ```
    /// use streamforge_core::Stream;
    ///
    /// let source: Box<dyn std::any::Any> = Box::new(vec![1, 2, 3]);
    /// let stream = Stream::<i32>::sequential_from_any(source.as_ref());
    /// assert_eq!(stream.to_vec().unwrap(), vec![1, 2, 3]);
    ///
    /// let not_a_sequence = Stream::<i32>::sequential_from_any(&7i32);
    /// assert!(not_a_sequence.err().is_some());
    /// ```
    pub fn sequential_from_any(source: &dyn Any) -> Self {
        Self::from_any(source, Mode::Sequential)
    }

    /// Creates a parallel stream from a dynamically typed source.
    ///
    /// Same contract as [`sequential_from_any`](Self::sequential_from_any);
    /// a rejected source yields a failed parallel stream.
    pub fn parallel_from_any(source: &dyn Any) -> Self {
        Self::from_any(source, Mode::parallel())
    }

    /// Creates a stream from a dynamically typed source in the given mode.
    pub fn from_any(source: &dyn Any, mode: Mode) -> Self {
        match source::read_any::<T>(source) {
            Ok(items) => Self::ready(mode, items),
            Err(error) => Self::fail_stage("source", mode, error),
        }
    }

    /// Creates a failed sequential stream.
    pub fn failed(error: StreamError) -> Self {
        Self::failed_with_mode(error, Mode::Sequential)
    }

    /// Creates a failed parallel stream.
    pub fn failed_parallel(error: StreamError) -> Self {
        Self::failed_with_mode(error, Mode::parallel())
    }

    /// Creates a failed stream in the given mode.
    pub fn failed_with_mode(error: StreamError, mode: Mode) -> Self {
        Self::with_state(mode, State::Failed(error))
    }

    /// Returns the stored error, if this stream has failed.
    pub fn err(&self) -> Option<&StreamError> {
        match &self.inner.state {
            State::Failed(error) => Some(error),
            State::Ready(_) => None,
        }
    }

    /// Returns true if this stream has failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.inner.state, State::Failed(_))
    }

    /// Returns true if this stream runs per-element stages in parallel.
    pub fn is_parallel(&self) -> bool {
        self.inner.mode.is_parallel()
    }

    /// Returns the execution mode.
    pub fn mode(&self) -> &Mode {
        &self.inner.mode
    }

    /// Returns the runtime tag of the element type.
    pub fn item_tag(&self) -> TypeTag {
        TypeTag::of::<T>()
    }

    /// Returns the number of elements, or `None` if this stream has failed.
    pub fn len(&self) -> Option<usize> {
        match &self.inner.state {
            State::Ready(items) => Some(items.len()),
            State::Failed(_) => None,
        }
    }

    /// Returns true if this stream is ready and holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Returns a sequential stream.
    ///
    /// Returns this same handle if the stream is already sequential;
    /// otherwise a new handle with the same elements or error.
    pub fn sequential(self) -> Self {
        if !self.is_parallel() {
            return self;
        }
        self.switch_mode(Mode::Sequential)
    }

    /// Returns a parallel stream.
    ///
    /// Returns this same handle if the stream is already parallel;
    /// otherwise a new handle on the process-wide rayon pool.
    pub fn parallel(self) -> Self {
        if self.is_parallel() {
            return self;
        }
        self.switch_mode(Mode::parallel())
    }

    /// Returns a parallel stream running on `executor`.
    ///
    /// Returns this same handle if it already runs on `executor`.
    pub fn parallel_on(self, executor: Arc<ParallelExecutor>) -> Self {
        if let Mode::Parallel(current) = &self.inner.mode {
            if Arc::ptr_eq(current, &executor) {
                return self;
            }
        }
        self.switch_mode(Mode::Parallel(executor))
    }

    /// Returns true if both handles refer to the same stream instance.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    fn switch_mode(self, mode: Mode) -> Self {
        trace!(
            from_parallel = self.is_parallel(),
            to_parallel = mode.is_parallel(),
            failed = self.is_failed(),
            "Switching stream mode"
        );
        let inner = self.into_inner();
        Self::with_state(mode, inner.state)
    }

    fn ready(mode: Mode, items: Vec<T>) -> Self {
        Self::with_state(mode, State::Ready(items))
    }

    fn with_state(mode: Mode, state: State<T>) -> Self {
        Self {
            inner: Arc::new(Inner { mode, state }),
        }
    }

    /// Takes the inner state, cloning it if the handle is shared.
    fn into_inner(self) -> Inner<T> {
        Arc::try_unwrap(self.inner).unwrap_or_else(|shared| (*shared).clone())
    }

    /// Splits into mode and elements, or the stored error.
    fn into_parts(self) -> (Mode, Result<Vec<T>>) {
        let inner = self.into_inner();
        let items = match inner.state {
            State::Ready(items) => Ok(items),
            State::Failed(error) => Err(error),
        };
        (inner.mode, items)
    }

    /// Splits a ready stream into mode and elements; hands a failed stream
    /// back unchanged so same-type stages can pass it through.
    fn split(self) -> std::result::Result<(Mode, Vec<T>), Self> {
        if self.is_failed() {
            return Err(self);
        }
        match self.into_parts() {
            (mode, Ok(items)) => Ok((mode, items)),
            (mode, Err(error)) => Err(Self::failed_with_mode(error, mode)),
        }
    }

    fn fail_stage(stage: &'static str, mode: Mode, error: StreamError) -> Self {
        debug!(
            stage,
            parallel = mode.is_parallel(),
            error = %error,
            "Stream stage failed"
        );
        Self::failed_with_mode(error, mode)
    }
}

fn log_stage(stage: &'static str, mode: &Mode, input: usize, output: usize) {
    trace!(
        stage,
        input,
        output,
        parallel = mode.is_parallel(),
        "Stream stage complete"
    );
}

impl<T: Item> Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Stream");
        s.field("item", &self.item_tag())
            .field("parallel", &self.is_parallel());
        match &self.inner.state {
            State::Ready(items) => s.field("len", &items.len()),
            State::Failed(error) => s.field("error", error),
        };
        s.finish()
    }
}

impl<T: Item> Default for Stream<T> {
    fn default() -> Self {
        Self::new_sequential(Vec::new())
    }
}

impl<T: Item> FromIterator<T> for Stream<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new_sequential(iter)
    }
}
