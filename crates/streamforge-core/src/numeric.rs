//! Streams specialized to a primitive numeric payload.
//!
//! Produced by [`Stream::map_to_int`] and [`Stream::map_to_f64`]. A numeric
//! stream keeps the mode of the stream it came from, including across a
//! failure.

use std::fmt::{self, Debug};

use num_traits::Num;

use crate::element::Item;
use crate::error::{Result, StreamError};
use crate::executor::Mode;
use crate::stream::Stream;

/// Numeric stream of `i64` values.
pub type IntStream = NumericStream<i64>;

/// Numeric stream of `f64` values.
pub type Float64Stream = NumericStream<f64>;

/// Stream of numbers, or the error of the stage that produced it.
pub struct NumericStream<N> {
    mode: Mode,
    values: Result<Vec<N>>,
}

impl<N: Item> NumericStream<N> {
    pub(crate) fn from_parts(mode: Mode, values: Result<Vec<N>>) -> Self {
        Self { mode, values }
    }

    /// Returns true if the source stream was parallel.
    pub fn is_parallel(&self) -> bool {
        self.mode.is_parallel()
    }

    /// Returns the stored error, if the stream has failed.
    pub fn err(&self) -> Option<&StreamError> {
        self.values.as_ref().err()
    }

    /// Returns the values in order, or the stored error.
    pub fn collect(self) -> Result<Vec<N>> {
        self.values
    }

    /// Returns the number of values.
    pub fn count(&self) -> Result<usize> {
        self.values.as_ref().map(Vec::len).map_err(Clone::clone)
    }

    /// Converts back into a general stream with the same mode.
    pub fn boxed(self) -> Stream<N> {
        match self.values {
            Ok(values) => Stream::new(values, self.mode),
            Err(error) => Stream::failed_with_mode(error, self.mode),
        }
    }
}

impl<N> NumericStream<N>
where
    N: Item + Num + Copy,
{
    /// Sums the values left to right; an empty stream sums to zero.
    ///
    /// ```
    /// use streamforge_core::Stream;
    ///
    /// let total = Stream::new_sequential(vec!["a", "bb", "ccc"])
    ///     .map_to_int(|s| s.len() as i64)
    ///     .sum()
    ///     .unwrap();
    /// assert_eq!(total, 6);
    /// ```
    pub fn sum(&self) -> Result<N> {
        match &self.values {
            Ok(values) => Ok(values.iter().fold(N::zero(), |acc, &v| acc + v)),
            Err(error) => Err(error.clone()),
        }
    }
}

impl<N: Item + Debug> Debug for NumericStream<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumericStream")
            .field("parallel", &self.is_parallel())
            .field("values", &self.values)
            .finish()
    }
}
