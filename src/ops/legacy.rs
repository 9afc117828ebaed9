//! Conversion between typed keys and raw `u32` key data
//!
//! Raw key data is the stable, persistable form of a key: an array of `u32`
//! words whose trailing axis holds one key. Typed key arrays are not a stable
//! format and should cross process boundaries as raw data.

use crate::config;
use crate::error::Result;
use crate::key::KeyArray;
use crate::tensor::Array;

/// Raw words of a key array, shape `key.shape() ++ [key_words]`
///
/// The returned array is a copy and never aliases the key.
pub fn key_data(key: &KeyArray) -> Array {
    key.key_data()
}

/// Reinterpret raw `u32` key data as typed keys
///
/// # Arguments
///
/// * `raw` - `u32` array whose trailing axis is the implementation's word count
/// * `impl_name` - Implementation to wrap as, or `None` for the process-wide default
///
/// # Errors
///
/// [`ShapeMismatch`](crate::error::Error::ShapeMismatch) if the trailing axis
/// is missing or has the wrong length,
/// [`UnsupportedDType`](crate::error::Error::UnsupportedDType) if `raw` is not `u32`.
pub fn wrap_key_data(raw: &Array, impl_name: Option<&str>) -> Result<KeyArray> {
    config::resolve_impl(impl_name)?.wrap_key_data(raw)
}
