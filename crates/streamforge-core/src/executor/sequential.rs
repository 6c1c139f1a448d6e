//! Single-threaded executor.

use std::cmp::Ordering;

use super::Executor;
use crate::error::Result;

/// Runs every stage on the caller's thread, in input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn is_parallel(&self) -> bool {
        false
    }

    fn filter<T, P>(&self, items: Vec<T>, predicate: &P) -> Vec<T>
    where
        T: Send,
        P: Fn(&T) -> bool + Sync,
    {
        items.into_iter().filter(|item| predicate(item)).collect()
    }

    fn map<T, U, F>(&self, items: Vec<T>, mapper: &F) -> Vec<U>
    where
        T: Send,
        U: Send,
        F: Fn(T) -> U + Sync,
    {
        items.into_iter().map(mapper).collect()
    }

    fn try_map<T, U, F>(&self, items: Vec<T>, mapper: &F) -> Result<Vec<U>>
    where
        T: Send,
        U: Send,
        F: Fn(T) -> Result<U> + Sync,
    {
        items.into_iter().map(mapper).collect()
    }

    fn map_ref<T, U, F>(&self, items: &[T], mapper: &F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Sync,
    {
        items.iter().map(mapper).collect()
    }

    fn sort_by<T, C>(&self, items: &mut [T], compare: &C)
    where
        T: Send,
        C: Fn(&T, &T) -> Ordering + Sync,
    {
        items.sort_by(compare);
    }
}
