//! Typed key arrays

use crate::error::{Error, Result};
use crate::prng::PrngImpl;
use crate::tensor::{Array, Shape, Storage};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Immutable array of PRNG keys tagged with the implementation that made them
///
/// A `KeyArray` of shape `[]` is a single key; shape `[n]` is a batch of `n`
/// independent keys, and so on. The key words themselves are opaque: the only
/// way to see or build them is through [`key_data`](Self::key_data) and
/// [`PrngImpl::wrap_key_data`].
///
/// Key arrays never change after construction. Clones share the word buffer,
/// and every operation that derives keys returns a new array.
#[derive(Clone)]
pub struct KeyArray {
    prng: PrngImpl,
    shape: Shape,
    words: Arc<[u32]>,
}

impl KeyArray {
    /// Assemble a key array from words laid out row-major, `key_words()` per key
    pub(crate) fn from_words(prng: PrngImpl, shape: Shape, words: Vec<u32>) -> Self {
        debug_assert_eq!(words.len(), shape.numel() * prng.key_words());
        Self {
            prng,
            shape,
            words: words.into(),
        }
    }

    /// Implementation that produced these keys
    #[inline]
    pub fn prng_impl(&self) -> &PrngImpl {
        &self.prng
    }

    /// Name of the implementation that produced these keys
    #[inline]
    pub fn impl_name(&self) -> &'static str {
        self.prng.name()
    }

    /// Key dtype name, e.g. `key<fry>`
    pub fn dtype_name(&self) -> String {
        format!("key<{}>", self.prng.tag())
    }

    /// Shape of the key array (excluding the word axis)
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Number of keys
    #[inline]
    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    /// Whether this is a single key
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.shape.is_scalar()
    }

    #[inline]
    pub(crate) fn words(&self) -> &[u32] {
        &self.words
    }

    /// Words of the key at flat index `index`
    pub fn words_of(&self, index: usize) -> Option<&[u32]> {
        let w = self.prng.key_words();
        let start = index.checked_mul(w)?;
        self.words.get(start..start + w)
    }

    /// Raw words as a fresh `u32` array of shape `shape ++ [key_words]`
    ///
    /// The array owns a copy; mutating it leaves this key array untouched.
    pub fn key_data(&self) -> Array {
        let shape = self.shape.concat(&self.prng.key_shape());
        Array::from_storage_unchecked(Storage::U32(self.words.to_vec()), &shape)
    }

    /// Sub-array at `index` along the leading axis
    pub fn get(&self, index: usize) -> Result<KeyArray> {
        let Some((&len, rest)) = self.shape.split_first() else {
            return Err(Error::invalid_argument("index", "cannot index a scalar key"));
        };
        if index >= len {
            return Err(Error::IndexOutOfBounds { index, size: len });
        }
        let stride = Shape::from(rest).numel() * self.prng.key_words();
        let words = self.words[index * stride..(index + 1) * stride].to_vec();
        Ok(Self::from_words(self.prng.clone(), Shape::from(rest), words))
    }

    /// Split off every entry of the leading axis
    pub fn unstack(&self) -> Result<Vec<KeyArray>> {
        let len = self.shape.first().copied().ok_or_else(|| {
            Error::invalid_argument("key", "cannot unstack a scalar key")
        })?;
        (0..len).map(|i| self.get(i)).collect()
    }

    /// Stack key arrays of one implementation and shape along a new leading axis
    pub fn stack(keys: &[KeyArray]) -> Result<KeyArray> {
        let first = keys
            .first()
            .ok_or_else(|| Error::invalid_argument("keys", "cannot stack zero key arrays"))?;

        let mut words = Vec::with_capacity(first.words.len() * keys.len());
        for key in keys {
            first.prng.check_key(key)?;
            if key.shape != first.shape {
                return Err(Error::shape_mismatch(&first.shape, &key.shape));
            }
            words.extend_from_slice(&key.words);
        }
        let shape = Shape::from([keys.len()]).concat(&first.shape);
        Ok(Self::from_words(first.prng.clone(), shape, words))
    }

    /// Same keys viewed under a different shape
    pub fn reshape(&self, shape: &[usize]) -> Result<KeyArray> {
        if Shape::checked_numel(shape)? != self.numel() {
            return Err(Error::shape_mismatch(shape, &self.shape));
        }
        Ok(Self {
            prng: self.prng.clone(),
            shape: Shape::from(shape),
            words: Arc::clone(&self.words),
        })
    }
}

impl PartialEq for KeyArray {
    fn eq(&self, other: &Self) -> bool {
        self.prng == other.prng && self.shape == other.shape && self.words == other.words
    }
}

impl Eq for KeyArray {}

impl Hash for KeyArray {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.prng.name().hash(state);
        self.shape.hash(state);
        self.words.hash(state);
    }
}

impl fmt::Debug for KeyArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyArray")
            .field("impl", &self.impl_name())
            .field("shape", &self.shape)
            .finish()
    }
}

impl fmt::Display for KeyArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", self.dtype_name(), self.shape)
    }
}
