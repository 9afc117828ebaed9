//! PRNG implementations: the four-operation descriptors behind every key
//!
//! A PRNG implementation bundles a key word layout with four pure operations:
//! `seed`, `split`, `fold_in` and `random_bits`. Implementations are written
//! against [`PrngAlgorithm`] and handed around as [`PrngImpl`], a cheap shared
//! handle whose methods validate arguments and reject keys produced by any
//! other implementation before dispatching.
//!
//! # Built-in implementations
//!
//! | Name | Key words | Shard-invariant bits |
//! |------|-----------|----------------------|
//! | `threefry2x32` (default) | 2 | yes |
//! | `rbg` | 4 | no |
//! | `unsafe_rbg` | 4 | no |
//!
//! `rbg` derives keys with Threefry and generates bits with a Philox stream.
//! `unsafe_rbg` uses the Philox stream for derivation too; the quality of its
//! split and fold_in streams is not validated.

mod rbg;
mod registry;
mod threefry;

pub use rbg::{Rbg, UnsafeRbg};
pub use registry::{RBG, Registry, THREEFRY2X32, UNSAFE_RBG, registry};
pub use threefry::Threefry2x32;

use crate::dtype::{BitWidth, Element};
use crate::error::{Error, Result};
use crate::kernels;
use crate::key::KeyArray;
use crate::tensor::{Array, BitsMut, Layout, Shape, Storage, with_bits_mut};
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// Counter space shared by all implementations
///
/// Split counts, bit-stream lengths and shard extents must stay below this
/// bound. Threefry uses the top two bits of its 64-bit counter to keep the
/// split, fold_in and random-bits domains apart.
pub const MAX_COUNTER: u64 = 1 << 62;

// ============================================================================
// Seeds
// ============================================================================

/// Integer seed accepted by `seed -> key`
///
/// Converts losslessly from every primitive integer up to 64 bits (and from
/// `i128`). Each implementation decides which values it accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Seed(i128);

impl Seed {
    /// The seed value
    #[inline]
    pub const fn get(self) -> i128 {
        self.0
    }

    /// Narrow to the signed 64-bit seed domain of the built-in implementations
    pub fn to_i64(self, impl_name: &'static str) -> Result<i64> {
        i64::try_from(self.0).map_err(|_| {
            Error::invalid_seed(
                self.0,
                impl_name,
                format!("seed must lie in [{}, {}]", i64::MIN, i64::MAX),
            )
        })
    }
}

macro_rules! impl_seed_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Seed {
                #[inline]
                fn from(value: $t) -> Self {
                    Seed(value as i128)
                }
            }
        )*
    };
}

impl_seed_from!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

// ============================================================================
// Algorithm Trait
// ============================================================================

/// The four pure operations of one PRNG algorithm over raw key words
///
/// Implementations only ever see well-formed inputs: [`PrngImpl`] checks key
/// tags, counts, widths and counter bounds before calling in. Every method
/// must be a pure function of its arguments.
pub trait PrngAlgorithm: Send + Sync + 'static {
    /// Registry name, e.g. `"threefry2x32"`
    fn name(&self) -> &'static str;

    /// Short tag shown in key dtypes, e.g. `"fry"` in `key<fry>`
    fn tag(&self) -> &'static str;

    /// Number of u32 words in one key
    fn key_words(&self) -> usize;

    /// Whether `random_bits` at an offset equals the same range of a call at offset 0
    ///
    /// When true, any rectangular shard of a conceptual output can be
    /// generated on its own and will match the full-shape call exactly.
    fn shard_invariant(&self) -> bool;

    /// Whether `width` is offered by this algorithm
    fn supports_width(&self, width: BitWidth) -> bool {
        let _ = width;
        true
    }

    /// Write the key for `seed` into `out` (`key_words()` long)
    fn seed(&self, seed: Seed, out: &mut [u32]) -> Result<()>;

    /// Write `out.len() / key_words()` child keys of `key` into `out`
    ///
    /// Child `i` must be a pure function of `(key, i)`.
    fn split(&self, key: &[u32], out: &mut [u32]);

    /// Write the key derived from `key` and `data` into `out`
    fn fold_in(&self, key: &[u32], data: u32, out: &mut [u32]);

    /// Fill `out` with elements `offset..offset + out.len()` of the bit stream of `key`
    ///
    /// The element width is the dtype of `out`.
    fn random_bits(&self, key: &[u32], offset: u64, out: BitsMut<'_>);
}

// ============================================================================
// PrngImpl Handle
// ============================================================================

/// Shared handle to a registered PRNG implementation
///
/// Two handles are equal only when they share the same registered algorithm
/// instance; clones compare equal, separately constructed handles do not,
/// even under the same name. Obtain handles through [`registry()`] so keys
/// made anywhere in the process dispatch to the same instance. Every method
/// taking a key first checks that the key was produced by this handle's
/// algorithm and fails with [`Error::KeyImplMismatch`] otherwise.
#[derive(Clone)]
pub struct PrngImpl {
    inner: Arc<dyn PrngAlgorithm>,
}

impl PrngImpl {
    /// Wrap an algorithm in a new, distinct handle
    ///
    /// Keys made through this handle are rejected by every other handle not
    /// cloned from it. Use [`Registry::register`] to share it by name.
    pub fn new<A: PrngAlgorithm>(algorithm: A) -> Self {
        Self {
            inner: Arc::new(algorithm),
        }
    }

    /// Registry name
    #[inline]
    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    /// Short dtype tag
    #[inline]
    pub fn tag(&self) -> &'static str {
        self.inner.tag()
    }

    /// Number of u32 words per key
    #[inline]
    pub fn key_words(&self) -> usize {
        self.inner.key_words()
    }

    /// Trailing shape of this implementation's raw key data
    #[inline]
    pub fn key_shape(&self) -> [usize; 1] {
        [self.key_words()]
    }

    /// Whether shards of `random_bits` output can be generated independently
    #[inline]
    pub fn shard_invariant(&self) -> bool {
        self.inner.shard_invariant()
    }

    /// Fail unless `key` was produced by this implementation
    pub fn check_key(&self, key: &KeyArray) -> Result<()> {
        if key.prng_impl() == self {
            Ok(())
        } else {
            Err(Error::KeyImplMismatch {
                expected: self.name(),
                got: key.impl_name(),
            })
        }
    }

    fn check_width(&self, bit_width: u32) -> Result<BitWidth> {
        let width = BitWidth::for_impl(bit_width, self.name())?;
        if !self.inner.supports_width(width) {
            return Err(Error::UnsupportedWidth {
                width: bit_width,
                impl_name: self.name(),
            });
        }
        Ok(width)
    }

    /// Create a scalar key from an integer seed
    pub fn seed(&self, seed: impl Into<Seed>) -> Result<KeyArray> {
        let mut words = vec![0u32; self.key_words()];
        self.inner.seed(seed.into(), &mut words)?;
        Ok(KeyArray::from_words(self.clone(), Shape::scalar(), words))
    }

    /// Split every key into `num` new keys
    ///
    /// For a key array of shape `K` the result has shape `K ++ [num]`.
    pub fn split(&self, key: &KeyArray, num: usize) -> Result<KeyArray> {
        self.split_shaped(key, &[num])
    }

    /// Split every key into a block of new keys of the given shape
    ///
    /// For a key array of shape `K` the result has shape `K ++ shape`; entry
    /// `[b..., i...]` depends only on key `b` and the flat index of `i`.
    pub fn split_shaped(&self, key: &KeyArray, shape: &[usize]) -> Result<KeyArray> {
        self.check_key(key)?;
        let num = Shape::checked_numel(shape)?;
        if num == 0 {
            return Err(Error::invalid_argument(
                "num",
                format!("split count must be positive, got shape {shape:?}"),
            ));
        }
        if num as u64 > MAX_COUNTER {
            return Err(Error::invalid_argument(
                "num",
                format!("split count {num} exceeds the counter space"),
            ));
        }

        let w = self.key_words();
        let out_shape = Shape::from(key.shape()).concat(shape);
        let overflow = || Error::invalid_argument("num", "split output size overflows");
        let total = Shape::checked_numel(&out_shape)?
            .checked_mul(w)
            .ok_or_else(overflow)?;
        if total == 0 {
            return Ok(KeyArray::from_words(self.clone(), out_shape, Vec::new()));
        }
        let child_words = num.checked_mul(w).ok_or_else(overflow)?;
        let mut out = vec![0u32; total];
        kernels::for_each_key(key.words(), w, &mut out, child_words, |k, o| {
            self.inner.split(k, o)
        });
        Ok(KeyArray::from_words(self.clone(), out_shape, out))
    }

    /// Fold `data` into every key
    pub fn fold_in(&self, key: &KeyArray, data: u32) -> Result<KeyArray> {
        self.check_key(key)?;
        let w = self.key_words();
        let mut out = vec![0u32; key.words().len()];
        kernels::for_each_key(key.words(), w, &mut out, w, |k, o| {
            self.inner.fold_in(k, data, o)
        });
        Ok(KeyArray::from_words(self.clone(), Shape::from(key.shape()), out))
    }

    /// Generate an array of raw random bits
    ///
    /// For a key array of shape `K` the result has shape `K ++ shape` and dtype
    /// matching `bit_width`; row `b` equals the call on key `b` alone.
    pub fn random_bits(&self, key: &KeyArray, bit_width: u32, shape: &[usize]) -> Result<Array> {
        self.check_key(key)?;
        let width = self.check_width(bit_width)?;
        let per_key = Shape::checked_numel(shape)?;
        check_counter_span(per_key)?;

        let out_shape = Shape::from(key.shape()).concat(shape);
        let total = Shape::checked_numel(&out_shape)?;
        let mut storage = Storage::zeros(total, width.dtype());

        if per_key > 0 {
            let w = self.key_words();
            let out = BitsMut::from(&mut storage);
            with_bits_mut!(out, s => self.fill_batched(key.words(), w, s, per_key));
        }
        Array::from_parts(storage, &out_shape)
    }

    fn fill_batched<T: Element>(&self, keys: &[u32], w: usize, out: &mut [T], per_key: usize) {
        for (k, chunk) in keys.chunks(w).zip(out.chunks_mut(per_key)) {
            self.inner.random_bits(k, 0, T::bits_mut(chunk));
        }
    }

    /// Generate one rectangular shard of a conceptual `random_bits` output
    ///
    /// Returns the sub-block `ranges` (one range per axis) of
    /// `random_bits(key, bit_width, global_shape)`. Shard-invariant
    /// implementations compute only the requested elements; others generate
    /// the full output and slice it.
    pub fn random_bits_shard(
        &self,
        key: &KeyArray,
        bit_width: u32,
        global_shape: &[usize],
        ranges: &[Range<usize>],
    ) -> Result<Array> {
        self.check_key(key)?;
        if !key.is_scalar() {
            return Err(Error::invalid_argument(
                "key",
                format!("shard generation takes a single key, got shape {:?}", key.shape()),
            ));
        }
        let width = self.check_width(bit_width)?;
        let numel = Shape::checked_numel(global_shape)?;
        check_counter_span(numel)?;

        let layout = Layout::contiguous(global_shape);
        let extents = layout.check_ranges(ranges)?;

        if !self.shard_invariant() {
            tracing::debug!(
                prng = self.name(),
                ?global_shape,
                "implementation is not shard-invariant; generating full output before slicing"
            );
            return self.random_bits(key, bit_width, global_shape)?.slice(ranges);
        }

        let mut storage = Storage::zeros(extents.numel(), width.dtype());
        {
            let mut out = BitsMut::from(&mut storage);
            let mut pos = 0usize;
            layout.for_each_run(ranges, |start, len| {
                self.inner
                    .random_bits(key.words(), start as u64, out.sub(pos, len));
                pos += len;
            });
        }
        Array::from_parts(storage, &extents)
    }

    /// Reinterpret raw key data as keys of this implementation
    ///
    /// `raw` must hold `u32` words with a trailing axis of length `key_words()`.
    /// The words are copied; the result never aliases `raw`.
    pub fn wrap_key_data(&self, raw: &Array) -> Result<KeyArray> {
        let words = raw
            .as_slice::<u32>()
            .map_err(|_| Error::unsupported_dtype(raw.dtype(), "wrap_key_data"))?;
        let w = self.key_words();
        let (last, batch) = match raw.shape().split_last() {
            Some((&last, batch)) => (last, batch),
            None => {
                return Err(Error::shape_mismatch(&[w], raw.shape()));
            }
        };
        if last != w {
            let expected = Shape::from(batch).concat(&[w]);
            return Err(Error::shape_mismatch(&expected, raw.shape()));
        }
        Ok(KeyArray::from_words(self.clone(), Shape::from(batch), words.to_vec()))
    }
}

fn check_counter_span(len: usize) -> Result<()> {
    if len as u64 <= MAX_COUNTER {
        Ok(())
    } else {
        Err(Error::invalid_argument(
            "shape",
            format!("{len} elements exceed the counter space"),
        ))
    }
}

impl PartialEq for PrngImpl {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for PrngImpl {}

impl fmt::Debug for PrngImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrngImpl")
            .field("name", &self.name())
            .field("key_words", &self.key_words())
            .field("shard_invariant", &self.shard_invariant())
            .finish()
    }
}

impl fmt::Display for PrngImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
