//! Counter-based hash kernels and the fill loops built on them
//!
//! # Algorithms
//!
//! - `threefry`: Threefry-2x32-20 (Salmon et al. 2011)
//! - `philox`: Philox4x32-10 (Salmon et al. 2011)
//!
//! Every fill loop computes element `g` of its output from `(key, g)` alone,
//! so chunking the output across threads never changes the result.
//!
//! Performance characteristics:
//! - Parallelization threshold: 4096 elements
//! - One hash evaluation is shared by all lanes of a block

mod philox;
mod threefry;

pub use philox::{PhiloxStream, philox4x32_10};
pub use threefry::{threefry2x32, threefry2x32_u64};

use crate::dtype::Element;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Parallelization threshold: skip Rayon for small outputs (overhead > benefit)
#[cfg_attr(not(feature = "rayon"), allow(dead_code))]
const PARALLEL_THRESHOLD: usize = 4096;

/// Elements handed to one Rayon task
#[cfg(feature = "rayon")]
const CHUNK_SIZE: usize = 4096;

/// Fill `out` with lanes of 64-bit blocks
///
/// Output element `i` has global index `g = offset + i`. With `per = 64 / bits`
/// lanes per block, it takes bits `[lane * bits, (lane + 1) * bits)` of
/// `block(g / per)`, where `lane = g % per`.
pub(crate) fn fill_packed<T, F>(out: &mut [T], offset: u64, block: F)
where
    T: Element,
    F: Fn(u64) -> u64 + Sync,
{
    #[cfg(feature = "rayon")]
    if out.len() >= PARALLEL_THRESHOLD {
        out.par_chunks_mut(CHUNK_SIZE)
            .enumerate()
            .for_each(|(c, chunk)| {
                fill_packed_serial(chunk, offset + (c * CHUNK_SIZE) as u64, &block)
            });
        return;
    }

    fill_packed_serial(out, offset, &block);
}

fn fill_packed_serial<T, F>(out: &mut [T], offset: u64, block: &F)
where
    T: Element,
    F: Fn(u64) -> u64,
{
    let bits = T::DTYPE.bits();
    let per = (64 / bits) as u64;
    let mut cached: Option<(u64, u64)> = None;

    for (i, o) in out.iter_mut().enumerate() {
        let g = offset + i as u64;
        let b = g / per;
        let word = match cached {
            Some((cb, w)) if cb == b => w,
            _ => {
                let w = block(b);
                cached = Some((b, w));
                w
            }
        };
        let lane = (g % per) as u32;
        *o = T::from_bits(word >> (lane * bits));
    }
}

/// Fill `out` from a 32-bit word stream delivered four words per block
///
/// Elements of up to 32 bits take word `g` truncated; 64-bit elements take
/// words `2g` (high half) and `2g + 1` (low half).
pub(crate) fn fill_streamed<T, F>(out: &mut [T], offset: u64, block: F)
where
    T: Element,
    F: Fn(u64) -> [u32; 4] + Sync,
{
    #[cfg(feature = "rayon")]
    if out.len() >= PARALLEL_THRESHOLD {
        out.par_chunks_mut(CHUNK_SIZE)
            .enumerate()
            .for_each(|(c, chunk)| {
                fill_streamed_serial(chunk, offset + (c * CHUNK_SIZE) as u64, &block)
            });
        return;
    }

    fill_streamed_serial(out, offset, &block);
}

fn fill_streamed_serial<T, F>(out: &mut [T], offset: u64, block: &F)
where
    T: Element,
    F: Fn(u64) -> [u32; 4],
{
    let mut cached: Option<(u64, [u32; 4])> = None;
    let mut word = |w: u64| {
        let b = w / 4;
        let words = match cached {
            Some((cb, ws)) if cb == b => ws,
            _ => {
                let ws = block(b);
                cached = Some((b, ws));
                ws
            }
        };
        words[(w % 4) as usize]
    };

    let wide = T::DTYPE.bits() == 64;
    for (i, o) in out.iter_mut().enumerate() {
        let g = offset + i as u64;
        let bits = if wide {
            ((word(2 * g) as u64) << 32) | word(2 * g + 1) as u64
        } else {
            word(g) as u64
        };
        *o = T::from_bits(bits);
    }
}

/// Apply `f(key, out)` to every key of a batch
///
/// `keys` holds `key_words` words per key and `out` holds `out_words` words per
/// key; batches are processed in parallel when the output is large.
pub(crate) fn for_each_key<F>(keys: &[u32], key_words: usize, out: &mut [u32], out_words: usize, f: F)
where
    F: Fn(&[u32], &mut [u32]) + Sync,
{
    if out_words == 0 {
        return;
    }

    #[cfg(feature = "rayon")]
    if out.len() >= PARALLEL_THRESHOLD && keys.len() > key_words {
        out.par_chunks_mut(out_words)
            .zip(keys.par_chunks(key_words))
            .for_each(|(o, k)| f(k, o));
        return;
    }

    for (o, k) in out.chunks_mut(out_words).zip(keys.chunks(key_words)) {
        f(k, o);
    }
}
