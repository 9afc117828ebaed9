//! Array types
//!
//! This module provides the host-side `Array` that random bits and raw key
//! words are returned in, along with the `Shape` and `Layout` machinery shared
//! with key arrays.

mod array;
mod layout;
mod shape;
mod storage;

pub use array::Array;
pub use layout::{Layout, Strides};
pub use shape::Shape;
pub use storage::{BitsMut, Storage};

pub(crate) use storage::with_bits_mut;
