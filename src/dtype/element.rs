//! Element trait for mapping Rust types to DType

use super::DType;
use crate::tensor::{BitsMut, Storage};
use bytemuck::{Pod, Zeroable};

/// Trait for types that can be elements of an `Array`
///
/// This trait connects Rust's type system to the runtime dtype system. It is
/// implemented for `u8`, `u16`, `u32` and `u64`, the only element types random
/// bits and raw key words ever take.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - Basic trait requirements
/// - `Pod + Zeroable` - Safe memory transmutation (bytemuck)
pub trait Element: Copy + Send + Sync + Pod + Zeroable + Eq + 'static {
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Truncate the low bits of a u64 into this type
    fn from_bits(bits: u64) -> Self;

    /// Wrap an owned vector in type-erased storage
    fn into_storage(data: Vec<Self>) -> Storage;

    /// View storage as this type, if the dtype matches
    fn view(storage: &Storage) -> Option<&[Self]>;

    /// Mutable view of storage as this type, if the dtype matches
    fn view_mut(storage: &mut Storage) -> Option<&mut [Self]>;

    /// Wrap a typed output slice for the random-bit kernels
    fn bits_mut(slice: &mut [Self]) -> BitsMut<'_>;
}

macro_rules! impl_element {
    ($t:ty, $dtype:ident) => {
        impl Element for $t {
            const DTYPE: DType = DType::$dtype;

            #[inline]
            fn from_bits(bits: u64) -> Self {
                bits as $t
            }

            #[inline]
            fn into_storage(data: Vec<Self>) -> Storage {
                Storage::$dtype(data)
            }

            #[inline]
            fn view(storage: &Storage) -> Option<&[Self]> {
                match storage {
                    Storage::$dtype(data) => Some(data.as_slice()),
                    _ => None,
                }
            }

            #[inline]
            fn view_mut(storage: &mut Storage) -> Option<&mut [Self]> {
                match storage {
                    Storage::$dtype(data) => Some(data.as_mut_slice()),
                    _ => None,
                }
            }

            #[inline]
            fn bits_mut(slice: &mut [Self]) -> BitsMut<'_> {
                BitsMut::$dtype(slice)
            }
        }
    };
}

impl_element!(u8, U8);
impl_element!(u16, U16);
impl_element!(u32, U32);
impl_element!(u64, U64);
