// Per-element stages: the ones the parallel executor fans out.

use super::{log_stage, Stream};
use crate::element::Item;
use crate::error::StreamError;
use crate::executor::{on_executor, Executor};
use crate::numeric::{Float64Stream, IntStream, NumericStream};

impl<T: Item> Stream<T> {
    /// Keeps the elements for which `predicate` returns true.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync,
    {
        let (mode, items) = match self.split() {
            Ok(parts) => parts,
            Err(failed) => return failed,
        };
        let input = items.len();
        let kept = on_executor!(&mode, exec => exec.filter(items, &predicate));
        log_stage("filter", &mode, input, kept.len());
        Self::ready(mode, kept)
    }

    /// Replaces every element with `mapper(element)`.
    pub fn map<U, F>(self, mapper: F) -> Stream<U>
    where
        U: Item,
        F: Fn(T) -> U + Send + Sync,
    {
        let (mode, items) = self.into_parts();
        let items = match items {
            Ok(items) => items,
            Err(error) => return Stream::failed_with_mode(error, mode),
        };
        let input = items.len();
        let mapped = on_executor!(&mode, exec => exec.map(items, &mapper));
        log_stage("map", &mode, input, mapped.len());
        Stream::ready(mode, mapped)
    }

    /// Replaces every element with the elements of the stream `mapper`
    /// returns for it, spliced in order.
    ///
    /// If any returned stream has failed, the result fails with
    /// [`StreamError::NestedStream`] wrapping that error, and elements after
    /// the failing one are not mapped. With several failures the earliest
    /// element's error wins in both modes.
    ///
    /// ```
    /// use streamforge_core::Stream;
    ///
    /// let result = Stream::new_parallel(vec![1, 2, 3])
    ///     .flat_map(|v| Stream::new_sequential(vec![v, -v]))
    ///     .to_vec()
    ///     .unwrap();
    /// assert_eq!(result, vec![1, -1, 2, -2, 3, -3]);
    /// ```
    pub fn flat_map<U, F>(self, mapper: F) -> Stream<U>
    where
        U: Item,
        F: Fn(T) -> Stream<U> + Send + Sync,
    {
        let (mode, items) = self.into_parts();
        let items = match items {
            Ok(items) => items,
            Err(error) => return Stream::failed_with_mode(error, mode),
        };
        let input = items.len();
        let expand = |item: T| {
            let (_, nested) = mapper(item).into_parts();
            nested.map_err(|error| StreamError::NestedStream(Box::new(error)))
        };

        match on_executor!(&mode, exec => exec.try_map(items, &expand)) {
            Ok(chunks) => {
                let flattened: Vec<U> = chunks.into_iter().flatten().collect();
                log_stage("flat_map", &mode, input, flattened.len());
                Stream::ready(mode, flattened)
            }
            Err(error) => Stream::fail_stage("flat_map", mode, error),
        }
    }

    /// Maps every element to an `i64`.
    pub fn map_to_int<F>(self, mapper: F) -> IntStream
    where
        F: Fn(T) -> i64 + Send + Sync,
    {
        self.map_to_numeric("map_to_int", mapper)
    }

    /// Maps every element to an `f64`.
    pub fn map_to_f64<F>(self, mapper: F) -> Float64Stream
    where
        F: Fn(T) -> f64 + Send + Sync,
    {
        self.map_to_numeric("map_to_f64", mapper)
    }

    fn map_to_numeric<N, F>(self, stage: &'static str, mapper: F) -> NumericStream<N>
    where
        N: Item,
        F: Fn(T) -> N + Send + Sync,
    {
        let (mode, items) = self.into_parts();
        let items = match items {
            Ok(items) => items,
            Err(error) => return NumericStream::from_parts(mode, Err(error)),
        };
        let input = items.len();
        let values = on_executor!(&mode, exec => exec.map(items, &mapper));
        log_stage(stage, &mode, input, values.len());
        NumericStream::from_parts(mode, Ok(values))
    }
}
