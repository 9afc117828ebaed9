//! Random bit generation

use crate::dtype::DType;
use crate::error::Result;
use crate::key::KeyArray;
use crate::tensor::Array;
use std::ops::Range;

/// Generate raw random bits
///
/// # Arguments
///
/// * `key` - Key or key array; a key array of shape `K` yields shape `K ++ shape`
/// * `bit_width` - One of 8, 16, 32, 64; selects the output dtype
/// * `shape` - Shape of the output per key
///
/// # Returns
///
/// Array of unsigned integers of the matching dtype. Equal arguments always
/// give equal output.
pub fn random_bits(key: &KeyArray, bit_width: u32, shape: &[usize]) -> Result<Array> {
    key.prng_impl().random_bits(key, bit_width, shape)
}

/// Generate raw random bits of an unsigned dtype
pub fn bits(key: &KeyArray, shape: &[usize], dtype: DType) -> Result<Array> {
    random_bits(key, dtype.bits(), shape)
}

/// Generate one rectangular shard of a `random_bits` output
///
/// The result equals `random_bits(key, bit_width, global_shape)` sliced by
/// `ranges`. For shard-invariant implementations only the shard is computed.
pub fn random_bits_shard(
    key: &KeyArray,
    bit_width: u32,
    global_shape: &[usize],
    ranges: &[Range<usize>],
) -> Result<Array> {
    key.prng_impl()
        .random_bits_shard(key, bit_width, global_shape, ranges)
}
