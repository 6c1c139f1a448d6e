//! Dynamically typed stream sources.

use std::any::Any;
use std::collections::VecDeque;

use crate::element::{Item, TypeTag};
use crate::error::{Result, StreamError};

/// Reads the elements of a sequence of `T` held behind `dyn Any`.
///
/// `None` of an `Option<Vec<T>>` is an empty sequence, not an error.
pub(crate) fn read_any<T: Item>(source: &dyn Any) -> Result<Vec<T>> {
    if let Some(items) = source.downcast_ref::<Vec<T>>() {
        return Ok(items.clone());
    }
    if let Some(items) = source.downcast_ref::<VecDeque<T>>() {
        return Ok(items.iter().cloned().collect());
    }
    if let Some(items) = source.downcast_ref::<Box<[T]>>() {
        return Ok(items.to_vec());
    }
    if let Some(items) = source.downcast_ref::<&'static [T]>() {
        return Ok(items.to_vec());
    }
    if let Some(items) = source.downcast_ref::<Option<Vec<T>>>() {
        return Ok(items.clone().unwrap_or_default());
    }

    let reason = if source.is::<T>() {
        "source is a single value, not a sequence"
    } else {
        "source is not a sequence of the element type"
    };
    Err(StreamError::SourceType {
        element: TypeTag::of::<T>(),
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_vec() {
        let source = vec![1, 2, 3];
        assert_eq!(read_any::<i32>(&source).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_read_deque_and_box() {
        let deque: VecDeque<&'static str> = VecDeque::from(vec!["a", "b"]);
        assert_eq!(read_any::<&'static str>(&deque).unwrap(), vec!["a", "b"]);

        let boxed: Box<[u8]> = vec![4, 5].into_boxed_slice();
        assert_eq!(read_any::<u8>(&boxed).unwrap(), vec![4, 5]);
    }

    #[test]
    fn test_read_static_slice() {
        static VALUES: [i64; 3] = [7, 8, 9];
        let slice: &'static [i64] = &VALUES;
        assert_eq!(read_any::<i64>(&slice).unwrap(), vec![7, 8, 9]);
    }

    #[test]
    fn test_read_absent_is_empty() {
        let absent: Option<Vec<i32>> = None;
        assert!(read_any::<i32>(&absent).unwrap().is_empty());

        let present: Option<Vec<i32>> = Some(vec![1]);
        assert_eq!(read_any::<i32>(&present).unwrap(), vec![1]);
    }

    #[test]
    fn test_read_single_value_rejected() {
        let err = read_any::<i32>(&5i32).unwrap_err();
        match err {
            StreamError::SourceType { element, reason } => {
                assert!(element.is::<i32>());
                assert!(reason.contains("single value"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_boxed_vec_rejected() {
        let boxed: Box<Vec<i32>> = Box::new(vec![1, 2, 3]);
        assert!(read_any::<i32>(&boxed).is_err());
    }

    #[test]
    fn test_read_wrong_element_type_rejected() {
        let source = vec!["a".to_string()];
        assert!(read_any::<i32>(&source).is_err());
    }
}
