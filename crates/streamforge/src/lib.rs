//! StreamForge - Sequential and parallel stream pipelines in Rust
//!
//! Build a [`Stream`] from a sequence, chain stages, finish with a terminal
//! operation. Parallel streams give the same results as sequential ones.
//!
//! # Example
//!
//! ```rust
//! use streamforge::prelude::*;
//!
//! let doubled = Stream::new_parallel(vec![1, 2, 3])
//!     .filter(|v| *v != 2)
//!     .map(|v| v * 2)
//!     .to_vec()
//!     .unwrap();
//! assert_eq!(doubled, vec![2, 6]);
//!
//! let total = Stream::new_sequential(1..=10).map_to_int(i64::from).sum();
//! assert_eq!(total, Ok(55));
//! ```

// Stream API
pub use streamforge_core::{
    concat, Destination, Float64Stream, IntStream, Item, NumericStream, Stream, TypeTag,
};

// Execution
pub use streamforge_core::{Executor, Mode, ParallelExecutor, SequentialExecutor};

// Errors
pub use streamforge_core::{Result, StreamError};

// Configuration
pub use streamforge_config::{
    ConfigError, ExecutionMode, ParallelConfig, StreamConfig, ThreadCount,
};

#[cfg(feature = "console")]
pub mod console;

mod pipeline;
pub use pipeline::Pipeline;

pub mod prelude {
    pub use crate::{
        concat, Float64Stream, IntStream, Mode, ParallelExecutor, Pipeline, Stream,
        StreamConfig, StreamError,
    };
}
