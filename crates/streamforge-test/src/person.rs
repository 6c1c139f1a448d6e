//! Person record fixtures.
//!
//! # Example
//!
//! ```
//! use streamforge_test::person::{people, PERSON_NAMES};
//!
//! let data = people(7);
//! assert_eq!(data.len(), PERSON_NAMES.len());
//! assert_eq!(data, people(7));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Year birth years are computed from.
pub const REFERENCE_YEAR: i32 = 2024;

/// Names used by [`people`]. "alisa" appears twice on purpose.
pub const PERSON_NAMES: [&str; 7] = ["niko", "mark", "shelly", "jack", "roman", "alisa", "alisa"];

/// A simple record with a name, an age and a birth year.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Person {
    pub name: String,
    pub age: u32,
    pub birth_year: i32,
}

impl Person {
    /// Creates a person of the given age.
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
            birth_year: REFERENCE_YEAR - age as i32,
        }
    }
}

/// Builds one [`Person`] per entry of [`PERSON_NAMES`], with ages in
/// `0..50` drawn from a ChaCha generator seeded with `seed`.
pub fn people(seed: u64) -> Vec<Person> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    PERSON_NAMES
        .iter()
        .map(|name| Person::new(*name, rng.random_range(0..50)))
        .collect()
}
