//! Collect destinations.
//!
//! A [`Destination`] receives the elements of a stream in order. The
//! built-in implementations accept any element type convertible with
//! `TryFrom`, so a `Stream<i64>` can fill a `Vec<u8>` as long as every value
//! fits. Conversion is all-or-nothing: the destination is only overwritten
//! once every element converted.

use std::any::{self, Any};
use std::collections::VecDeque;

use crate::element::{Item, TypeTag};
use crate::error::{Result, StreamError};

/// Ordered container a stream can be collected into.
pub trait Destination<T> {
    /// Replaces the contents of `self` with `items`, in order.
    ///
    /// On error `self` must be left unchanged.
    fn fill(&mut self, items: Vec<T>) -> Result<()>;
}

impl<T, U> Destination<T> for Vec<U>
where
    T: Item,
    U: TryFrom<T>,
{
    fn fill(&mut self, items: Vec<T>) -> Result<()> {
        let converted = convert_all::<T, U>(items)?;
        self.clear();
        self.extend(converted);
        Ok(())
    }
}

impl<T, U> Destination<T> for VecDeque<U>
where
    T: Item,
    U: TryFrom<T>,
{
    fn fill(&mut self, items: Vec<T>) -> Result<()> {
        let converted = convert_all::<T, U>(items)?;
        self.clear();
        self.extend(converted);
        Ok(())
    }
}

fn convert_all<T, U>(items: Vec<T>) -> Result<Vec<U>>
where
    T: Item,
    U: TryFrom<T>,
{
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            U::try_from(item).map_err(|_| StreamError::DestinationType {
                element: TypeTag::of::<T>(),
                reason: format!(
                    "element {index} does not fit in {}",
                    any::type_name::<U>()
                ),
            })
        })
        .collect()
}

/// Fills a dynamically typed destination with `items`.
pub(crate) fn fill_any<T: Item>(destination: &mut dyn Any, items: Vec<T>) -> Result<()> {
    if let Some(vec) = destination.downcast_mut::<Vec<T>>() {
        *vec = items;
        return Ok(());
    }
    if let Some(deque) = destination.downcast_mut::<VecDeque<T>>() {
        *deque = items.into();
        return Ok(());
    }

    let reason = if destination.is::<T>() {
        "destination is a single value, not a sequence".to_string()
    } else {
        format!(
            "destination is neither {} nor {}",
            any::type_name::<Vec<T>>(),
            any::type_name::<VecDeque<T>>()
        )
    };
    Err(StreamError::DestinationType {
        element: TypeTag::of::<T>(),
        reason,
    })
}
