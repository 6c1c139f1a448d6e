//! Stream concatenation.

use crate::element::Item;
use crate::stream::Stream;

/// Concatenates two streams: the elements of `first`, then those of `second`.
///
/// If `first` has failed it is returned as is. Otherwise, if `second` has
/// failed, the result fails with `second`'s error. The result always takes
/// the mode (and executor) of `first`.
///
/// # Example
///
/// ```
/// use streamforge_core::{concat, Stream, StreamError};
///
/// let joined = concat(Stream::new_sequential(vec![1, 2]), Stream::new_parallel(vec![3]));
/// assert!(!joined.is_parallel());
/// assert_eq!(joined.to_vec().unwrap(), vec![1, 2, 3]);
///
/// let failed = concat(
///     Stream::failed(StreamError::custom("boom")),
///     Stream::new_sequential(vec![1, 2, 3]),
/// );
/// assert_eq!(failed.to_vec(), Err(StreamError::custom("boom")));
/// ```
pub fn concat<T: Item>(first: Stream<T>, second: Stream<T>) -> Stream<T> {
    if first.is_failed() {
        return first;
    }
    let mode = first.mode().clone();
    let items = first.to_vec().and_then(|mut items| {
        items.extend(second.to_vec()?);
        Ok(items)
    });
    match items {
        Ok(items) => Stream::new(items, mode),
        Err(error) => Stream::failed_with_mode(error, mode),
    }
}
