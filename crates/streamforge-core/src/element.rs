//! Element bounds and runtime type tags.
//!
//! A `Stream<T>` carries its element type in `T`. The [`TypeTag`] captured
//! from `T` is the runtime half of that information: it names the element
//! type at the dynamic boundaries (`Stream::sequential_from_any`,
//! `Stream::collect_any`) and in errors.

use std::any::{self, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Bound shared by every stream element.
///
/// Elements may be cloned when a stream handle is shared, and are moved
/// across worker threads in parallel mode.
pub trait Item: Any + Clone + Send + Sync {}

impl<T> Item for T where T: Any + Clone + Send + Sync {}

/// Runtime identity of an element type.
///
/// # Example
///
/// ```
/// use streamforge_core::TypeTag;
///
/// let tag = TypeTag::of::<i32>();
/// assert!(tag.is::<i32>());
/// assert!(!tag.is::<i64>());
/// assert_eq!(tag.name(), "i32");
/// ```
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Captures the tag of `T`.
    pub fn of<T: ?Sized + Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    /// Returns the type id.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the type name as reported by the compiler.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if this tag was captured from `T`.
    pub fn is<T: ?Sized + Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeTag").field(&self.name).finish()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_identity() {
        assert_eq!(TypeTag::of::<String>(), TypeTag::of::<String>());
        assert_ne!(TypeTag::of::<String>(), TypeTag::of::<&'static str>());
        assert!(TypeTag::of::<Vec<u8>>().is::<Vec<u8>>());
    }

    #[test]
    fn test_tag_display() {
        let tag = TypeTag::of::<u64>();
        assert_eq!(format!("{}", tag), "u64");
        assert_eq!(format!("{:?}", tag), "TypeTag(\"u64\")");
    }
}
