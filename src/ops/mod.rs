//! Key and random-bit operations
//!
//! Free functions over [`KeyArray`](crate::key::KeyArray) that dispatch on the
//! implementation each key carries:
//!
//! ```text
//! seed ──key──▶ KeyArray ──split / split_shaped / fold_in──▶ KeyArray
//!                  │
//!                  ├──random_bits / bits / random_bits_shard──▶ Array
//!                  └──key_data──▶ Array (u32) ──wrap_key_data──▶ KeyArray
//! ```
//!
//! Only key creation consults the process-wide default implementation. Every
//! other operation uses the key's own implementation, so a key keeps behaving
//! the same way no matter how the default changes after it was made.
//!
//! To pin an implementation and have foreign keys rejected with
//! [`Error::KeyImplMismatch`](crate::error::Error::KeyImplMismatch), call the
//! same operations on a [`PrngImpl`](crate::prng::PrngImpl) directly.

mod bits;
mod keys;
mod legacy;

pub use bits::{bits, random_bits, random_bits_shard};
pub use keys::{fold_in, key, key_impl, key_with_impl, split, split_shaped};
pub use legacy::{key_data, wrap_key_data};
