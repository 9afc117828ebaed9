//! Data type system for random bit arrays
//!
//! Random bits and raw key words are always unsigned integers. This module
//! provides the `DType` enum naming them at runtime, the `BitWidth` accepted by
//! `random_bits`, and the `Element` trait mapping Rust types onto both.

mod element;

pub use element::Element;

use crate::error::{Error, Result};
use std::fmt;

// ============================================================================
// DType Enum
// ============================================================================

/// Element types of arrays produced by prngkey
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DType {
    /// 64-bit unsigned integer
    U64,
    /// 32-bit unsigned integer (raw key words)
    U32,
    /// 16-bit unsigned integer
    U16,
    /// 8-bit unsigned integer
    U8,
}

impl DType {
    /// Size of one element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::U64 => 8,
            Self::U32 => 4,
            Self::U16 => 2,
            Self::U8 => 1,
        }
    }

    /// Number of bits in one element
    #[inline]
    pub const fn bits(self) -> u32 {
        (self.size_in_bytes() * 8) as u32
    }

    /// Short name for display (e.g., "u32")
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::U64 => "u64",
            Self::U32 => "u32",
            Self::U16 => "u16",
            Self::U8 => "u8",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

// ============================================================================
// Bit Widths
// ============================================================================

/// Widths accepted by `random_bits`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BitWidth {
    /// 8 bits per element
    W8,
    /// 16 bits per element
    W16,
    /// 32 bits per element
    W32,
    /// 64 bits per element
    W64,
}

impl BitWidth {
    /// Every width, narrowest first
    pub const ALL: [BitWidth; 4] = [Self::W8, Self::W16, Self::W32, Self::W64];

    /// Parse a raw width, returning `None` outside {8, 16, 32, 64}
    pub const fn new(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(Self::W8),
            16 => Some(Self::W16),
            32 => Some(Self::W32),
            64 => Some(Self::W64),
            _ => None,
        }
    }

    /// Number of bits
    #[inline]
    pub const fn bits(self) -> u32 {
        match self {
            Self::W8 => 8,
            Self::W16 => 16,
            Self::W32 => 32,
            Self::W64 => 64,
        }
    }

    /// Unsigned dtype holding one element of this width
    #[inline]
    pub const fn dtype(self) -> DType {
        match self {
            Self::W8 => DType::U8,
            Self::W16 => DType::U16,
            Self::W32 => DType::U32,
            Self::W64 => DType::U64,
        }
    }

    /// Mask selecting the low `bits()` bits of a u64
    #[inline]
    pub const fn mask(self) -> u64 {
        match self {
            Self::W64 => u64::MAX,
            w => (1u64 << w.bits()) - 1,
        }
    }

    /// Resolve a raw width on behalf of an implementation
    pub(crate) fn for_impl(bits: u32, impl_name: &'static str) -> Result<Self> {
        Self::new(bits).ok_or(Error::UnsupportedWidth {
            width: bits,
            impl_name,
        })
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_sizes() {
        assert_eq!(DType::U8.size_in_bytes(), 1);
        assert_eq!(DType::U16.size_in_bytes(), 2);
        assert_eq!(DType::U32.size_in_bytes(), 4);
        assert_eq!(DType::U64.size_in_bytes(), 8);
        assert_eq!(DType::U64.bits(), 64);
    }

    #[test]
    fn test_bit_width_parse() {
        assert_eq!(BitWidth::new(8), Some(BitWidth::W8));
        assert_eq!(BitWidth::new(64), Some(BitWidth::W64));
        assert_eq!(BitWidth::new(12), None);
        assert_eq!(BitWidth::new(0), None);
        assert_eq!(BitWidth::new(128), None);
    }

    #[test]
    fn test_bit_width_mask() {
        assert_eq!(BitWidth::W8.mask(), 0xFF);
        assert_eq!(BitWidth::W16.mask(), 0xFFFF);
        assert_eq!(BitWidth::W32.mask(), 0xFFFF_FFFF);
        assert_eq!(BitWidth::W64.mask(), u64::MAX);
    }

    #[test]
    fn test_width_dtype_roundtrip() {
        for width in BitWidth::ALL {
            assert_eq!(width.dtype().bits(), width.bits());
            assert_eq!(BitWidth::new(width.dtype().bits()), Some(width));
        }
    }

    #[test]
    fn test_for_impl_error() {
        let err = BitWidth::for_impl(24, "threefry2x32").unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedWidth {
                width: 24,
                impl_name: "threefry2x32"
            }
        );
    }
}
