//! `rbg` and `unsafe_rbg`: four-word keys driving a Philox bit generator

use super::{PrngAlgorithm, Seed, Threefry2x32};
use crate::error::Result;
use crate::kernels::{self, PhiloxStream};
use crate::tensor::{BitsMut, with_bits_mut};

#[inline]
fn key4(key: &[u32]) -> [u32; 4] {
    [key[0], key[1], key[2], key[3]]
}

fn seed_words(seed: Seed, impl_name: &'static str, out: &mut [u32]) -> Result<()> {
    let s = seed.to_i64(impl_name)? as u64;
    let (hi, lo) = ((s >> 32) as u32, s as u32);
    out.copy_from_slice(&[hi, lo, hi, lo]);
    Ok(())
}

fn stream_bits(key: &[u32], offset: u64, out: BitsMut<'_>) {
    let stream = PhiloxStream::new(key4(key));
    with_bits_mut!(out, s => kernels::fill_streamed(s, offset, |b| stream.block(b)));
}

/// Threefry-derived keys with Philox random bits
///
/// Each key is two Threefry keys side by side. Split and fold_in apply the
/// Threefry operation to both halves independently; random bits come from
/// the Philox stream seeded by all four words.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rbg;

impl PrngAlgorithm for Rbg {
    fn name(&self) -> &'static str {
        super::RBG
    }

    fn tag(&self) -> &'static str {
        "rbg"
    }

    fn key_words(&self) -> usize {
        4
    }

    fn shard_invariant(&self) -> bool {
        false
    }

    fn seed(&self, seed: Seed, out: &mut [u32]) -> Result<()> {
        seed_words(seed, self.name(), out)
    }

    fn split(&self, key: &[u32], out: &mut [u32]) {
        let num = out.len() / 4;
        let mut halves = [vec![0u32; num * 2], vec![0u32; num * 2]];
        Threefry2x32.split(&key[..2], &mut halves[0]);
        Threefry2x32.split(&key[2..], &mut halves[1]);
        for (i, child) in out.chunks_exact_mut(4).enumerate() {
            child[..2].copy_from_slice(&halves[0][2 * i..2 * i + 2]);
            child[2..].copy_from_slice(&halves[1][2 * i..2 * i + 2]);
        }
    }

    fn fold_in(&self, key: &[u32], data: u32, out: &mut [u32]) {
        let (lo, hi) = out.split_at_mut(2);
        Threefry2x32.fold_in(&key[..2], data, lo);
        Threefry2x32.fold_in(&key[2..], data, hi);
    }

    fn random_bits(&self, key: &[u32], offset: u64, out: BitsMut<'_>) {
        stream_bits(key, offset, out)
    }
}

/// Philox-only variant of [`Rbg`]
///
/// Split and fold_in draw from the Philox stream too, which is faster but
/// whose derived-key statistics are not validated. Split child `i` is block
/// `10 * i` of the key's stream; fold_in XORs the key with block 9 of the
/// stream seeded by the folded data.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsafeRbg;

const SPLIT_STRIDE: u64 = 10;
const FOLD_BLOCK: u64 = 9;

impl PrngAlgorithm for UnsafeRbg {
    fn name(&self) -> &'static str {
        super::UNSAFE_RBG
    }

    fn tag(&self) -> &'static str {
        "unsafe_rbg"
    }

    fn key_words(&self) -> usize {
        4
    }

    fn shard_invariant(&self) -> bool {
        false
    }

    fn seed(&self, seed: Seed, out: &mut [u32]) -> Result<()> {
        seed_words(seed, self.name(), out)
    }

    fn split(&self, key: &[u32], out: &mut [u32]) {
        let stream = PhiloxStream::new(key4(key));
        for (i, child) in out.chunks_exact_mut(4).enumerate() {
            child.copy_from_slice(&stream.block(SPLIT_STRIDE * i as u64));
        }
    }

    fn fold_in(&self, key: &[u32], data: u32, out: &mut [u32]) {
        let mask = PhiloxStream::new([0, data, 0, data]).block(FOLD_BLOCK);
        for ((o, &k), m) in out.iter_mut().zip(key).zip(mask) {
            *o = k ^ m;
        }
    }

    fn random_bits(&self, key: &[u32], offset: u64, out: BitsMut<'_>) {
        stream_bits(key, offset, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed<A: PrngAlgorithm>(alg: &A, s: i64) -> [u32; 4] {
        let mut out = [0u32; 4];
        alg.seed(Seed::from(s), &mut out).unwrap();
        out
    }

    #[test]
    fn test_seed_layout() {
        assert_eq!(seed(&Rbg, 5), [0, 5, 0, 5]);
        assert_eq!(seed(&UnsafeRbg, -2), [u32::MAX, u32::MAX - 1, u32::MAX, u32::MAX - 1]);
    }

    #[test]
    fn test_rbg_split_halves_follow_threefry() {
        let k = seed(&Rbg, 9);
        let mut out = [0u32; 12];
        Rbg.split(&k, &mut out);

        let mut fry = [0u32; 6];
        Threefry2x32.split(&k[..2], &mut fry);
        for i in 0..3 {
            assert_eq!(out[4 * i..4 * i + 2], fry[2 * i..2 * i + 2]);
            assert_eq!(out[4 * i + 2..4 * i + 4], fry[2 * i..2 * i + 2]);
        }
    }

    #[test]
    fn test_rbg_fold_in_halves() {
        let k = [1u32, 2, 3, 4];
        let mut out = [0u32; 4];
        Rbg.fold_in(&k, 17, &mut out);

        let mut lo = [0u32; 2];
        let mut hi = [0u32; 2];
        Threefry2x32.fold_in(&k[..2], 17, &mut lo);
        Threefry2x32.fold_in(&k[2..], 17, &mut hi);
        assert_eq!(out[..2], lo);
        assert_eq!(out[2..], hi);
    }

    #[test]
    fn test_bits_come_from_stream() {
        let k = [10u32, 20, 30, 40];
        let stream = PhiloxStream::new(k);

        let mut words = [0u32; 6];
        Rbg.random_bits(&k, 0, BitsMut::U32(&mut words));
        for (w, &x) in words.iter().enumerate() {
            assert_eq!(x, stream.word(w as u64));
        }

        let mut wide = [0u64; 1];
        UnsafeRbg.random_bits(&k, 1, BitsMut::U64(&mut wide));
        assert_eq!(wide[0], ((stream.word(2) as u64) << 32) | stream.word(3) as u64);
    }

    #[test]
    fn test_unsafe_split_and_fold() {
        let k = seed(&UnsafeRbg, 0);
        let stream = PhiloxStream::new(k);

        let mut children = [0u32; 8];
        UnsafeRbg.split(&k, &mut children);
        assert_eq!(children[..4], stream.block(0));
        assert_eq!(children[4..], stream.block(10));

        let mut a = [0u32; 4];
        let mut b = [0u32; 4];
        UnsafeRbg.fold_in(&k, 1, &mut a);
        UnsafeRbg.fold_in(&k, 2, &mut b);
        assert_ne!(a, b);
        assert_ne!(a, k);
    }
}
