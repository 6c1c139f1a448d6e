// Terminal operations: materialize a stream into a concrete result.

use std::any::Any;

use super::Stream;
use crate::collect::{fill_any, Destination};
use crate::element::Item;
use crate::error::Result;

impl<T: Item> Stream<T> {
    /// Folds the elements left to right, seeded with the first element.
    ///
    /// Returns `Ok(None)` for an empty stream and the stored error for a
    /// failed one.
    ///
    /// ```
    /// use streamforge_core::Stream;
    ///
    /// let sum = Stream::new_sequential(1..=10).reduce(|a, b| a + b).unwrap();
    /// assert_eq!(sum, Some(55));
    /// ```
    pub fn reduce<F>(self, combiner: F) -> Result<Option<T>>
    where
        F: Fn(T, T) -> T,
    {
        let (_, items) = self.into_parts();
        Ok(items?.into_iter().reduce(combiner))
    }

    /// Overwrites `destination` with the elements, in order.
    ///
    /// Every element is converted before the destination is touched, so a
    /// [`StreamError::DestinationType`](crate::StreamError::DestinationType)
    /// leaves it unchanged.
    ///
    /// ```
    /// use streamforge_core::Stream;
    ///
    /// let mut bytes: Vec<u8> = vec![9];
    /// Stream::new_sequential(vec![1i64, 2, 3]).collect_into(&mut bytes).unwrap();
    /// assert_eq!(bytes, vec![1, 2, 3]);
    ///
    /// let too_big = Stream::new_sequential(vec![1i64, 300]).collect_into(&mut bytes);
    /// assert!(too_big.is_err());
    /// assert_eq!(bytes, vec![1, 2, 3]);
    /// ```
    pub fn collect_into<D>(self, destination: &mut D) -> Result<()>
    where
        D: Destination<T> + ?Sized,
    {
        let (_, items) = self.into_parts();
        destination.fill(items?)
    }

    /// Overwrites a dynamically typed destination with the elements.
    ///
    /// The destination must be a `Vec<T>` or `VecDeque<T>`; anything else,
    /// including a single `T`, is a
    /// [`StreamError::DestinationType`](crate::StreamError::DestinationType).
    pub fn collect_any(self, destination: &mut dyn Any) -> Result<()> {
        let (_, items) = self.into_parts();
        fill_any(destination, items?)
    }

    /// Collects the elements into any `FromIterator` container.
    pub fn collect<C>(self) -> Result<C>
    where
        C: FromIterator<T>,
    {
        let (_, items) = self.into_parts();
        Ok(items?.into_iter().collect())
    }

    /// Returns the elements as a `Vec`.
    pub fn to_vec(self) -> Result<Vec<T>> {
        self.into_parts().1
    }

    /// Returns the number of elements.
    pub fn count(self) -> Result<usize> {
        match &self.inner.state {
            super::State::Ready(items) => Ok(items.len()),
            super::State::Failed(error) => Err(error.clone()),
        }
    }

    /// Appends `other` to this stream. See [`concat`](crate::concat).
    pub fn concat(self, other: Stream<T>) -> Self {
        crate::concat::concat(self, other)
    }
}
