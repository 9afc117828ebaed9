//! Storage: owned host buffers of unsigned words

use crate::dtype::DType;

/// Type-erased owned buffer backing an `Array`
///
/// One variant per element dtype; the variant is the array's dtype.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Storage {
    /// 8-bit elements
    U8(Vec<u8>),
    /// 16-bit elements
    U16(Vec<u16>),
    /// 32-bit elements
    U32(Vec<u32>),
    /// 64-bit elements
    U64(Vec<u64>),
}

impl Storage {
    /// Zero-filled storage of `len` elements
    pub fn zeros(len: usize, dtype: DType) -> Self {
        match dtype {
            DType::U8 => Self::U8(vec![0; len]),
            DType::U16 => Self::U16(vec![0; len]),
            DType::U32 => Self::U32(vec![0; len]),
            DType::U64 => Self::U64(vec![0; len]),
        }
    }

    /// Element dtype
    #[inline]
    pub fn dtype(&self) -> DType {
        match self {
            Self::U8(_) => DType::U8,
            Self::U16(_) => DType::U16,
            Self::U32(_) => DType::U32,
            Self::U64(_) => DType::U64,
        }
    }

    /// Number of elements (not bytes)
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::U16(v) => v.len(),
            Self::U32(v) => v.len(),
            Self::U64(v) => v.len(),
        }
    }

    /// Whether the buffer holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Native-endian bytes of the buffer
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::U8(v) => v.as_slice(),
            Self::U16(v) => bytemuck::cast_slice(v),
            Self::U32(v) => bytemuck::cast_slice(v),
            Self::U64(v) => bytemuck::cast_slice(v),
        }
    }

    /// Copy native-endian bytes into correctly aligned storage
    ///
    /// `bytes.len()` must equal `len * dtype.size_in_bytes()`.
    pub(crate) fn from_bytes(bytes: &[u8], dtype: DType) -> Self {
        // Allocate with correct alignment for the element type, then copy the
        // bytes in. Casting a Vec<u8> to a stricter-aligned type is not sound.
        let mut storage = Self::zeros(bytes.len() / dtype.size_in_bytes(), dtype);
        let dst: &mut [u8] = match &mut storage {
            Self::U8(v) => v.as_mut_slice(),
            Self::U16(v) => bytemuck::cast_slice_mut(v),
            Self::U32(v) => bytemuck::cast_slice_mut(v),
            Self::U64(v) => bytemuck::cast_slice_mut(v),
        };
        dst.copy_from_slice(bytes);
        storage
    }

    /// Element at `index` widened to u64
    pub(crate) fn get_u64(&self, index: usize) -> Option<u64> {
        match self {
            Self::U8(v) => v.get(index).map(|&x| x as u64),
            Self::U16(v) => v.get(index).map(|&x| x as u64),
            Self::U32(v) => v.get(index).map(|&x| x as u64),
            Self::U64(v) => v.get(index).copied(),
        }
    }

    /// Copy `len` elements starting at `start` onto the end of `dst`
    ///
    /// Both buffers must share a dtype.
    pub(crate) fn extend_from(&mut self, src: &Storage, start: usize, len: usize) {
        let range = start..start + len;
        match (self, src) {
            (Self::U8(d), Self::U8(s)) => d.extend_from_slice(&s[range]),
            (Self::U16(d), Self::U16(s)) => d.extend_from_slice(&s[range]),
            (Self::U32(d), Self::U32(s)) => d.extend_from_slice(&s[range]),
            (Self::U64(d), Self::U64(s)) => d.extend_from_slice(&s[range]),
            _ => unreachable!("extend_from called with mismatched dtypes"),
        }
    }

    /// Empty storage of the same dtype with room for `capacity` elements
    pub(crate) fn with_capacity_like(&self, capacity: usize) -> Self {
        match self {
            Self::U8(_) => Self::U8(Vec::with_capacity(capacity)),
            Self::U16(_) => Self::U16(Vec::with_capacity(capacity)),
            Self::U32(_) => Self::U32(Vec::with_capacity(capacity)),
            Self::U64(_) => Self::U64(Vec::with_capacity(capacity)),
        }
    }
}

/// Mutable view over a typed output buffer
///
/// Random-bit kernels receive this so a single object-safe method can fill any
/// of the four element types.
pub enum BitsMut<'a> {
    /// 8-bit output
    U8(&'a mut [u8]),
    /// 16-bit output
    U16(&'a mut [u16]),
    /// 32-bit output
    U32(&'a mut [u32]),
    /// 64-bit output
    U64(&'a mut [u64]),
}

impl BitsMut<'_> {
    /// Element dtype
    pub fn dtype(&self) -> DType {
        match self {
            Self::U8(_) => DType::U8,
            Self::U16(_) => DType::U16,
            Self::U32(_) => DType::U32,
            Self::U64(_) => DType::U64,
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            Self::U8(s) => s.len(),
            Self::U16(s) => s.len(),
            Self::U32(s) => s.len(),
            Self::U64(s) => s.len(),
        }
    }

    /// Whether the view is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reborrow `len` elements starting at `start`
    pub fn sub(&mut self, start: usize, len: usize) -> BitsMut<'_> {
        let range = start..start + len;
        match self {
            Self::U8(s) => BitsMut::U8(&mut s[range]),
            Self::U16(s) => BitsMut::U16(&mut s[range]),
            Self::U32(s) => BitsMut::U32(&mut s[range]),
            Self::U64(s) => BitsMut::U64(&mut s[range]),
        }
    }
}

impl<'a> From<&'a mut Storage> for BitsMut<'a> {
    fn from(storage: &'a mut Storage) -> Self {
        match storage {
            Storage::U8(v) => BitsMut::U8(v.as_mut_slice()),
            Storage::U16(v) => BitsMut::U16(v.as_mut_slice()),
            Storage::U32(v) => BitsMut::U32(v.as_mut_slice()),
            Storage::U64(v) => BitsMut::U64(v.as_mut_slice()),
        }
    }
}

/// Run `$body` with `$s` bound to the typed slice inside a `BitsMut`
///
/// Usage: `with_bits_mut!(out, s => fill(s, ...))`
macro_rules! with_bits_mut {
    ($out:expr, $s:ident => $body:expr) => {
        match $out {
            $crate::tensor::BitsMut::U8($s) => $body,
            $crate::tensor::BitsMut::U16($s) => $body,
            $crate::tensor::BitsMut::U32($s) => $body,
            $crate::tensor::BitsMut::U64($s) => $body,
        }
    };
}

pub(crate) use with_bits_mut;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_roundtrip() {
        let storage = Storage::U32(vec![1, 0xDEAD_BEEF, 7]);
        let bytes = storage.as_bytes().to_vec();
        assert_eq!(bytes.len(), 12);
        assert_eq!(Storage::from_bytes(&bytes, DType::U32), storage);
    }

    #[test]
    fn test_extend_from() {
        let src = Storage::U16(vec![1, 2, 3, 4, 5]);
        let mut dst = src.with_capacity_like(2);
        dst.extend_from(&src, 1, 2);
        dst.extend_from(&src, 4, 1);
        assert_eq!(dst, Storage::U16(vec![2, 3, 5]));
    }

    #[test]
    fn test_bits_mut_view() {
        let mut storage = Storage::zeros(3, DType::U64);
        {
            let view = BitsMut::from(&mut storage);
            assert_eq!(view.dtype(), DType::U64);
            assert_eq!(view.len(), 3);
            with_bits_mut!(view, s => s.fill(Default::default()));
        }
        assert_eq!(storage.get_u64(2), Some(0));
    }
}
