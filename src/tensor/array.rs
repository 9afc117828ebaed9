//! Core Array type

use super::{Layout, Shape, Storage};
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use std::fmt;

/// N-dimensional host array of unsigned integers
///
/// `Array` is what random bits come out as and what the legacy key format is
/// made of. It consists of:
/// - **Storage**: owned, typed element buffer
/// - **Layout**: shape and row-major strides
///
/// Arrays own their data outright. Nothing returned to a caller ever shares a
/// buffer with a key, so mutating an array cannot change any key.
///
/// # Example
///
/// ```
/// use prngkey::tensor::Array;
///
/// let a = Array::from_slice(&[1u32, 2, 3, 4], &[2, 2])?;
/// assert_eq!(a.shape(), &[2, 2]);
/// assert_eq!(a.to_vec::<u32>(), vec![1, 2, 3, 4]);
/// # Ok::<(), prngkey::error::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Array {
    storage: Storage,
    layout: Layout,
}

impl Array {
    /// Create an array from storage and a shape
    pub(crate) fn from_parts(storage: Storage, shape: &[usize]) -> Result<Self> {
        let expected = Shape::checked_numel(shape)?;
        if storage.len() != expected {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![storage.len()],
            });
        }
        Ok(Self {
            storage,
            layout: Layout::contiguous(shape),
        })
    }

    /// Create an array whose storage length is known to match `shape`
    pub(crate) fn from_storage_unchecked(storage: Storage, shape: &[usize]) -> Self {
        debug_assert_eq!(storage.len(), shape.iter().product::<usize>());
        Self {
            storage,
            layout: Layout::contiguous(shape),
        }
    }

    /// Create an array from a slice of data
    ///
    /// Returns an error if `data.len()` does not equal the product of the `shape` dimensions.
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize]) -> Result<Self> {
        Self::from_vec(data.to_vec(), shape)
    }

    /// Create an array taking ownership of `data`
    pub fn from_vec<T: Element>(data: Vec<T>, shape: &[usize]) -> Result<Self> {
        Self::from_parts(T::into_storage(data), shape)
    }

    /// Create a zero-filled array
    pub fn zeros(shape: &[usize], dtype: DType) -> Result<Self> {
        let len = Shape::checked_numel(shape)?;
        Self::from_parts(Storage::zeros(len, dtype), shape)
    }

    /// Rebuild an array from native-endian bytes produced by [`Self::to_bytes`]
    pub fn from_bytes(bytes: &[u8], dtype: DType, shape: &[usize]) -> Result<Self> {
        let len = Shape::checked_numel(shape)?;
        let expected = len.checked_mul(dtype.size_in_bytes()).ok_or_else(|| {
            Error::invalid_argument("shape", format!("byte size of {shape:?} overflows"))
        })?;
        if bytes.len() != expected {
            return Err(Error::invalid_argument(
                "bytes",
                format!(
                    "expected {expected} bytes for {dtype} array of shape {shape:?}, got {}",
                    bytes.len()
                ),
            ));
        }
        Self::from_parts(Storage::from_bytes(bytes, dtype), shape)
    }

    /// Native-endian bytes of the elements in row-major order
    pub fn to_bytes(&self) -> Vec<u8> {
        self.storage.as_bytes().to_vec()
    }

    /// Get the layout
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Number of dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Total number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.storage.len()
    }

    /// Element dtype
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// Borrow the backing storage
    #[inline]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Typed view of the elements
    pub fn as_slice<T: Element>(&self) -> Result<&[T]> {
        T::view(&self.storage).ok_or(Error::UnsupportedDType {
            dtype: self.dtype(),
            op: "as_slice",
        })
    }

    /// Mutable typed view of the elements
    pub fn as_mut_slice<T: Element>(&mut self) -> Result<&mut [T]> {
        let dtype = self.dtype();
        T::view_mut(&mut self.storage).ok_or(Error::UnsupportedDType {
            dtype,
            op: "as_mut_slice",
        })
    }

    /// Copy the elements out as a vector
    ///
    /// # Panics
    ///
    /// Panics if `T` does not match the array dtype. Use [`Self::as_slice`]
    /// for a fallible alternative.
    pub fn to_vec<T: Element>(&self) -> Vec<T> {
        match T::view(&self.storage) {
            Some(data) => data.to_vec(),
            None => panic!(
                "Array::to_vec: requested {} but array holds {}",
                T::DTYPE,
                self.dtype()
            ),
        }
    }

    /// Element at a multi-index, widened to u64
    pub fn get(&self, indices: &[usize]) -> Option<u64> {
        let flat = self.layout.index(indices)?;
        self.storage.get_u64(flat)
    }

    /// Same elements viewed under a different shape
    pub fn reshape(&self, shape: &[usize]) -> Result<Self> {
        let len = Shape::checked_numel(shape)?;
        if len != self.numel() {
            return Err(Error::shape_mismatch(shape, self.shape()));
        }
        Ok(Self {
            storage: self.storage.clone(),
            layout: Layout::contiguous(shape),
        })
    }

    /// Copy of the sub-array `start..start + length` along `dim`
    pub fn narrow(&self, dim: usize, start: usize, length: usize) -> Result<Self> {
        if dim >= self.ndim() {
            return Err(Error::invalid_argument(
                "dim",
                format!("dimension {dim} out of range for {}-d array", self.ndim()),
            ));
        }
        let end = start.checked_add(length).filter(|&e| e <= self.shape()[dim]).ok_or_else(|| {
            Error::invalid_argument(
                "length",
                format!(
                    "range {start}..{start}+{length} exceeds dimension {dim} of size {}",
                    self.shape()[dim]
                ),
            )
        })?;
        let ranges: Vec<_> = self
            .shape()
            .iter()
            .enumerate()
            .map(|(axis, &size)| if axis == dim { start..end } else { 0..size })
            .collect();
        self.slice(&ranges)
    }

    /// Copy of the rectangular sub-block selected by per-axis ranges
    pub fn slice(&self, ranges: &[std::ops::Range<usize>]) -> Result<Self> {
        let extents = self.layout.check_ranges(ranges)?;
        let mut out = self.storage.with_capacity_like(extents.numel());
        self.layout
            .for_each_run(ranges, |start, len| out.extend_from(&self.storage, start, len));
        Self::from_parts(out, &extents)
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("shape", &self.shape())
            .field("dtype", &self.dtype())
            .finish()
    }
}
