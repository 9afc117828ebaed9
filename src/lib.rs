//! # prngkey
//!
//! **Splittable, counter-based pseudorandom number generation with explicit keys.**
//!
//! prngkey carries all generator state in immutable keys. Nothing is global
//! and nothing is sequential: every key, child key and random bit is a pure
//! function of its inputs, so draws can run in any order, on any number of
//! threads, batched or sharded, and still reproduce bit for bit.
//!
//! ## Features
//!
//! - **Keys**: scalar or batched, tagged with the implementation that made them
//! - **Derivation**: `split` into independent children, `fold_in` integer data
//! - **Bits**: 8/16/32/64-bit unsigned arrays, batched and shardable
//! - **Implementations**: `threefry2x32` (default), `rbg`, `unsafe_rbg`, or your own
//! - **Legacy bridge**: keys to and from raw `u32` arrays for persistence
//!
//! ## Quick Start
//!
//! ```rust
//! use prngkey::prelude::*;
//!
//! let k0 = key_with_impl(1701, Some("threefry2x32"))?;
//! let children = split(&k0, 2)?;
//! let (k1, k2) = (children.get(0)?, children.get(1)?);
//!
//! let a = random_bits(&k1, 32, &[1])?;
//! let b = random_bits(&k2, 32, &[1])?;
//! assert_ne!(a, b);
//! assert_eq!(a, random_bits(&k1, 32, &[1])?);
//! # Ok::<(), prngkey::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): Multi-threaded bit generation and batched derivation
//!
//! ## Logging
//!
//! Registration, default changes and shard fallbacks are reported through
//! [`tracing`]. No subscriber is installed by the library.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod dtype;
pub mod error;
pub mod kernels;
pub mod key;
pub mod ops;
pub mod prng;
pub mod tensor;

pub use error::{Error, Result};
pub use key::KeyArray;
pub use prng::{PrngAlgorithm, PrngImpl, Seed};
pub use tensor::Array;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{default_impl_name, set_default_impl};
    pub use crate::dtype::{BitWidth, DType};
    pub use crate::error::{Error, Result};
    pub use crate::key::KeyArray;
    pub use crate::ops::*;
    pub use crate::prng::{PrngAlgorithm, PrngImpl, Seed, registry};
    pub use crate::tensor::{Array, Shape};
}
