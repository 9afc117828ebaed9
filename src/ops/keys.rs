//! Key creation and derivation

use crate::config;
use crate::error::Result;
use crate::key::KeyArray;
use crate::prng::Seed;

/// Create a key from an integer seed with the default implementation
///
/// Equal seeds always give equal keys; distinct seeds give distinct keys.
pub fn key(seed: impl Into<Seed>) -> Result<KeyArray> {
    key_with_impl(seed, None)
}

/// Create a key from an integer seed
///
/// # Arguments
///
/// * `seed` - Integer seed; the built-in implementations accept the `i64` range
/// * `impl_name` - Implementation to use, or `None` for the process-wide default
///
/// # Errors
///
/// [`UnknownImpl`](crate::error::Error::UnknownImpl) for an unregistered name,
/// [`InvalidSeed`](crate::error::Error::InvalidSeed) for a seed outside the
/// implementation's domain.
pub fn key_with_impl(seed: impl Into<Seed>, impl_name: Option<&str>) -> Result<KeyArray> {
    config::resolve_impl(impl_name)?.seed(seed)
}

/// Split each key into `num` new keys, appending an axis of length `num`
///
/// `split(k, n)` is reproducible, its entries are pairwise distinct and none
/// of them equals `k` or any `fold_in(k, i)`.
pub fn split(key: &KeyArray, num: usize) -> Result<KeyArray> {
    key.prng_impl().split(key, num)
}

/// Split each key into a block of new keys of the given shape
pub fn split_shaped(key: &KeyArray, shape: &[usize]) -> Result<KeyArray> {
    key.prng_impl().split_shaped(key, shape)
}

/// Derive a new key from each key and an integer
///
/// Use this to give call sites their own streams without consuming a split.
/// Any integer is accepted and reduced to its low 32 bits (two's complement),
/// so `fold_in(k, -1)` is `fold_in(k, u32::MAX)` and `fold_in(k, 1u64 << 32)`
/// is `fold_in(k, 0)`.
pub fn fold_in(key: &KeyArray, data: impl Into<i128>) -> Result<KeyArray> {
    key.prng_impl().fold_in(key, data.into() as u32)
}

/// Name of the implementation a key belongs to
pub fn key_impl(key: &KeyArray) -> &'static str {
    key.impl_name()
}
