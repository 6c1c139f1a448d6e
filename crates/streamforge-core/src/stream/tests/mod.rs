//! Tests for streams.
//!
//! Operation suites in [`operations`] run against every factory below, so
//! sequential and parallel streams are held to the same expectations.

mod operations;

use std::sync::Arc;

use super::*;

type Factory = fn(Vec<i32>) -> Stream<i32>;

fn sequential(items: Vec<i32>) -> Stream<i32> {
    Stream::new_sequential(items)
}

fn parallel(items: Vec<i32>) -> Stream<i32> {
    Stream::new_parallel(items)
}

fn parallel_small_chunks(items: Vec<i32>) -> Stream<i32> {
    let executor = ParallelExecutor::with_threads(3)
        .unwrap()
        .with_min_chunk_len(2);
    Stream::new_parallel_on(items, Arc::new(executor))
}

const FACTORIES: [(&str, Factory); 3] = [
    ("sequential", sequential),
    ("parallel", parallel),
    ("parallel_small_chunks", parallel_small_chunks),
];

/// Runs `check` once per factory.
fn for_each_factory(check: impl Fn(&str, Factory)) {
    for (name, factory) in FACTORIES {
        check(name, factory);
    }
}

fn boom() -> StreamError {
    StreamError::custom("boom")
}
