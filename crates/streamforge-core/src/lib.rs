//! StreamForge Core - Chainable stream pipelines with sequential and
//! parallel execution
//!
//! This crate provides the pipeline engine for StreamForge:
//! - [`Stream`] with filter, map, flat_map, sorted, limit, skip, distinct,
//!   reduce and collect
//! - Executors running per-element work on the caller's thread or a rayon pool
//! - Failed streams that turn every later operation into a pass-through
//! - Numeric streams and typed collect destinations

pub mod collect;
pub mod concat;
pub mod element;
pub mod error;
pub mod executor;
pub mod numeric;
mod source;
pub mod stream;

pub use collect::Destination;
pub use concat::concat;
pub use element::{Item, TypeTag};
pub use error::{Result, StreamError};
pub use executor::{Executor, Mode, ParallelExecutor, SequentialExecutor};
pub use numeric::{Float64Stream, IntStream, NumericStream};
pub use stream::Stream;
