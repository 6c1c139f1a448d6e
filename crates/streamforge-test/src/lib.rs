//! Shared test fixtures for StreamForge crates.
//!
//! This crate provides plain data and seeded generators for testing.
//! It does NOT depend on `streamforge-core`, so core can use it as a
//! dev-dependency.
//!
//! - [`person`] - A small record model with names, ages and birth years
//! - [`sequence`] - Seeded integer sequences and stability probes
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! streamforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use streamforge_test::person::{people, Person};
//! use streamforge_test::sequence::random_ints;
//! ```

pub mod person;
pub mod sequence;

pub use person::{people, Person};
pub use sequence::{random_ints, random_lengths, Ranked};
