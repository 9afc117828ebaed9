//! Threefry-2x32-20 block hash
//!
//! 20-round Threefish-based cipher from Salmon et al. "Parallel Random Numbers: As Easy as 1, 2, 3" (2011),
//! in its 2-word, 32-bit variant.

/// Rotation constants, alternating per group of four rounds
const THREEFRY_ROTATION: [[u32; 4]; 2] = [[13, 15, 26, 6], [17, 29, 16, 24]];

const THREEFRY_PARITY32: u32 = 0x1BD11BDA;

/// MIX: add + rotate + xor
#[inline(always)]
fn mix(x: &mut [u32; 2], rot: u32) {
    x[0] = x[0].wrapping_add(x[1]);
    x[1] = x[1].rotate_left(rot) ^ x[0];
}

/// Threefry-2x32-20: hash one 2-word counter under a 2-word key
///
/// Bijective in `ctr` for a fixed key. All arithmetic wraps modulo 2^32.
#[inline]
pub fn threefry2x32(key: [u32; 2], ctr: [u32; 2]) -> [u32; 2] {
    // Extend key with parity
    let ks = [key[0], key[1], key[0] ^ key[1] ^ THREEFRY_PARITY32];

    let mut x = [ctr[0].wrapping_add(ks[0]), ctr[1].wrapping_add(ks[1])];

    for group in 0..5usize {
        for &rot in &THREEFRY_ROTATION[group % 2] {
            mix(&mut x, rot);
        }

        // Inject round key after every 4 rounds
        let s = group + 1;
        x[0] = x[0].wrapping_add(ks[s % 3]);
        x[1] = x[1].wrapping_add(ks[(s + 1) % 3]).wrapping_add(s as u32);
    }

    x
}

/// Hash a 64-bit counter split into `[hi, lo]` words
#[inline(always)]
pub fn threefry2x32_u64(key: [u32; 2], ctr: u64) -> [u32; 2] {
    threefry2x32(key, [(ctr >> 32) as u32, ctr as u32])
}
