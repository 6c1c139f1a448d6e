// Order-dependent stages. They operate on the already ordered sequence;
// only sorting and distinct key extraction use the executor.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;

use super::{log_stage, Stream};
use crate::element::Item;
use crate::error::StreamError;
use crate::executor::{on_executor, Executor};

impl<T: Item> Stream<T> {
    /// Stable sort under the strict order `less`.
    ///
    /// Elements for which neither `less(a, b)` nor `less(b, a)` holds keep
    /// their original relative order.
    pub fn sorted<L>(self, less: L) -> Self
    where
        L: Fn(&T, &T) -> bool + Send + Sync,
    {
        let (mode, mut items) = match self.split() {
            Ok(parts) => parts,
            Err(failed) => return failed,
        };
        let compare = |a: &T, b: &T| ordering_from_less(&less, a, b);
        on_executor!(&mode, exec => exec.sort_by(&mut items, &compare));
        log_stage("sorted", &mode, items.len(), items.len());
        Self::ready(mode, items)
    }

    /// Keeps at most the first `max_size` elements.
    ///
    /// A negative `max_size` fails the stream with
    /// [`StreamError::InvalidArgument`]; the mode is preserved.
    pub fn limit(self, max_size: i64) -> Self {
        let (mode, mut items) = match self.split() {
            Ok(parts) => parts,
            Err(failed) => return failed,
        };
        let max_size = match non_negative("limit", max_size) {
            Ok(max_size) => max_size,
            Err(error) => return Self::fail_stage("limit", mode, error),
        };
        let input = items.len();
        items.truncate(max_size);
        log_stage("limit", &mode, input, items.len());
        Self::ready(mode, items)
    }

    /// Drops the first `n` elements.
    ///
    /// Skipping more elements than exist yields an empty stream. A negative
    /// `n` fails the stream with [`StreamError::InvalidArgument`].
    pub fn skip(self, n: i64) -> Self {
        if n == 0 {
            return self;
        }
        let (mode, mut items) = match self.split() {
            Ok(parts) => parts,
            Err(failed) => return failed,
        };
        let n = match non_negative("skip", n) {
            Ok(n) => n,
            Err(error) => return Self::fail_stage("skip", mode, error),
        };
        let input = items.len();
        items.drain(..n.min(input));
        log_stage("skip", &mode, input, items.len());
        Self::ready(mode, items)
    }

    /// Removes later duplicates, keeping the first occurrence.
    ///
    /// Two elements are duplicates when `equals(kept_key, candidate_key)`
    /// holds. Each candidate is compared against every key kept so far, so
    /// `equals` need not be transitive. Keys are extracted on the executor;
    /// the comparison scan runs in input order.
    ///
    /// ```
    /// use streamforge_core::Stream;
    ///
    /// let names = Stream::new_sequential(vec!["niko", "Mark", "mark", "NIKO"])
    ///     .distinct(|s| s.to_lowercase(), |a, b| a == b)
    ///     .to_vec()
    ///     .unwrap();
    /// assert_eq!(names, vec!["niko", "Mark"]);
    /// ```
    pub fn distinct<K, KF, EQ>(self, key_of: KF, equals: EQ) -> Self
    where
        K: Send,
        KF: Fn(&T) -> K + Send + Sync,
        EQ: Fn(&K, &K) -> bool,
    {
        let (mode, items) = match self.split() {
            Ok(parts) => parts,
            Err(failed) => return failed,
        };
        let input = items.len();
        let keys = on_executor!(&mode, exec => exec.map_ref(&items, &key_of));

        let mut kept_keys: Vec<K> = Vec::new();
        let mut kept = Vec::new();
        for (item, key) in items.into_iter().zip(keys) {
            if kept_keys.iter().any(|kept_key| equals(kept_key, &key)) {
                continue;
            }
            kept_keys.push(key);
            kept.push(item);
        }
        log_stage("distinct", &mode, input, kept.len());
        Self::ready(mode, kept)
    }

    /// Removes later duplicates by a hashable key, keeping the first
    /// occurrence.
    ///
    /// Same result as `distinct(key_of, |a, b| a == b)` for keys whose `Eq`
    /// is lawful, in linear time.
    pub fn distinct_by_key<K, KF>(self, key_of: KF) -> Self
    where
        K: Hash + Eq + Send,
        KF: Fn(&T) -> K + Send + Sync,
    {
        let (mode, items) = match self.split() {
            Ok(parts) => parts,
            Err(failed) => return failed,
        };
        let input = items.len();
        let keys = on_executor!(&mode, exec => exec.map_ref(&items, &key_of));

        let mut seen = HashSet::with_capacity(keys.len());
        let kept: Vec<T> = items
            .into_iter()
            .zip(keys)
            .filter_map(|(item, key)| seen.insert(key).then_some(item))
            .collect();
        log_stage("distinct_by_key", &mode, input, kept.len());
        Self::ready(mode, kept)
    }
}

fn ordering_from_less<T, L>(less: &L, a: &T, b: &T) -> Ordering
where
    L: Fn(&T, &T) -> bool,
{
    if less(a, b) {
        Ordering::Less
    } else if less(b, a) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

fn non_negative(operation: &'static str, value: i64) -> Result<usize, StreamError> {
    if value < 0 {
        return Err(StreamError::InvalidArgument { operation, value });
    }
    Ok(usize::try_from(value).unwrap_or(usize::MAX))
}
