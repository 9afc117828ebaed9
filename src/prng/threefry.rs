//! `threefry2x32`: the default implementation

use super::{PrngAlgorithm, Seed};
use crate::error::Result;
use crate::kernels::{self, threefry2x32_u64};
use crate::tensor::{BitsMut, with_bits_mut};

/// Counter domain of split children (top bits `00`)
const SPLIT_DOMAIN: u64 = 0;
/// Counter domain of random-bits blocks (top bits `01`)
const BITS_DOMAIN: u64 = 1 << 62;
/// Counter domain of fold_in data (top bits `10`)
const FOLD_DOMAIN: u64 = 1 << 63;

/// Threefry-2x32-20 keyed on two u32 words
///
/// Every derived quantity is one hash of the parent key under a 64-bit
/// counter whose top two bits name the operation, so split children, folded
/// keys and random-bit blocks are drawn from disjoint counter ranges.
///
/// Random bits are packed: one hash yields 64 bits, shared by the `64 / w`
/// consecutive elements of width `w` that fall in the same block. Element `g`
/// depends only on `(key, g)`, which makes the output shard-invariant.
#[derive(Debug, Clone, Copy, Default)]
pub struct Threefry2x32;

#[inline]
fn key2(key: &[u32]) -> [u32; 2] {
    [key[0], key[1]]
}

impl PrngAlgorithm for Threefry2x32 {
    fn name(&self) -> &'static str {
        super::THREEFRY2X32
    }

    fn tag(&self) -> &'static str {
        "fry"
    }

    fn key_words(&self) -> usize {
        2
    }

    fn shard_invariant(&self) -> bool {
        true
    }

    fn seed(&self, seed: Seed, out: &mut [u32]) -> Result<()> {
        let s = seed.to_i64(self.name())? as u64;
        out[0] = (s >> 32) as u32;
        out[1] = s as u32;
        Ok(())
    }

    fn split(&self, key: &[u32], out: &mut [u32]) {
        let k = key2(key);
        for (i, child) in out.chunks_exact_mut(2).enumerate() {
            child.copy_from_slice(&threefry2x32_u64(k, SPLIT_DOMAIN | i as u64));
        }
    }

    fn fold_in(&self, key: &[u32], data: u32, out: &mut [u32]) {
        out.copy_from_slice(&threefry2x32_u64(key2(key), FOLD_DOMAIN | data as u64));
    }

    fn random_bits(&self, key: &[u32], offset: u64, out: BitsMut<'_>) {
        let k = key2(key);
        let block = move |b: u64| {
            let [lo, hi] = threefry2x32_u64(k, BITS_DOMAIN | b);
            ((hi as u64) << 32) | lo as u64
        };
        with_bits_mut!(out, s => kernels::fill_packed(s, offset, block));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::threefry2x32;

    fn seed(s: i64) -> [u32; 2] {
        let mut out = [0u32; 2];
        Threefry2x32.seed(Seed::from(s), &mut out).unwrap();
        out
    }

    #[test]
    fn test_seed_words() {
        assert_eq!(seed(0), [0, 0]);
        assert_eq!(seed(42), [0, 42]);
        assert_eq!(seed(1 << 32), [1, 0]);
        assert_eq!(seed(-1), [u32::MAX, u32::MAX]);
        assert_ne!(seed(-1), seed(i64::MAX));
    }

    #[test]
    fn test_seed_rejects_outside_i64() {
        let mut out = [0u32; 2];
        assert!(Threefry2x32.seed(Seed::from(u64::MAX), &mut out).is_err());
        assert!(Threefry2x32.seed(Seed::from(i64::MAX as u64), &mut out).is_ok());
    }

    #[test]
    fn test_split_children_are_counter_hashes() {
        let k = seed(7);
        let mut out = [0u32; 6];
        Threefry2x32.split(&k, &mut out);
        for i in 0..3 {
            assert_eq!(out[2 * i..2 * i + 2], threefry2x32(k, [0, i as u32]));
        }
    }

    #[test]
    fn test_fold_in_domain_disjoint_from_split() {
        let k = seed(0);
        let mut children = [0u32; 8];
        Threefry2x32.split(&k, &mut children);
        for i in 0..4u32 {
            let mut folded = [0u32; 2];
            Threefry2x32.fold_in(&k, i, &mut folded);
            assert_ne!(folded[..], children[2 * i as usize..2 * i as usize + 2]);
            assert_eq!(folded, threefry2x32(k, [0x8000_0000, i]));
        }
    }

    #[test]
    fn test_random_bits_lanes() {
        let k = seed(3);
        let mut wide = [0u64; 2];
        Threefry2x32.random_bits(&k, 0, BitsMut::U64(&mut wide));
        let mut narrow = [0u32; 4];
        Threefry2x32.random_bits(&k, 0, BitsMut::U32(&mut narrow));

        for b in 0..2 {
            assert_eq!(narrow[2 * b] as u64, wide[b] & 0xFFFF_FFFF);
            assert_eq!(narrow[2 * b + 1] as u64, wide[b] >> 32);
        }
        let [lo, hi] = threefry2x32(k, [0x4000_0000, 0]);
        assert_eq!(narrow[0], lo);
        assert_eq!(narrow[1], hi);
    }

    #[test]
    fn test_random_bits_offset() {
        let k = seed(11);
        let mut full = [0u8; 40];
        Threefry2x32.random_bits(&k, 0, BitsMut::U8(&mut full));
        let mut part = [0u8; 9];
        Threefry2x32.random_bits(&k, 13, BitsMut::U8(&mut part));
        assert_eq!(full[13..22], part);
    }
}
