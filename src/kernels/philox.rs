//! Philox4x32-10 block hash and the bit-generator stream built on it
//!
//! 10-round Feistel cipher from Salmon et al. "Parallel Random Numbers: As Easy as 1, 2, 3" (2011)

const PHILOX_M4X32_0: u32 = 0xD2511F53;
const PHILOX_M4X32_1: u32 = 0xCD9E8D57;
const PHILOX_W32_0: u32 = 0x9E3779B9;
const PHILOX_W32_1: u32 = 0xBB67AE85;

/// Philox4x32 round function
#[inline(always)]
fn philox_round(ctr: [u32; 4], key: [u32; 2]) -> [u32; 4] {
    let prod0 = (ctr[0] as u64).wrapping_mul(PHILOX_M4X32_0 as u64);
    let prod1 = (ctr[2] as u64).wrapping_mul(PHILOX_M4X32_1 as u64);

    [
        ((prod1 >> 32) as u32) ^ ctr[1] ^ key[0],
        prod1 as u32,
        ((prod0 >> 32) as u32) ^ ctr[3] ^ key[1],
        prod0 as u32,
    ]
}

/// Philox4x32-10: hash one 4-word counter under a 2-word key
#[inline]
pub fn philox4x32_10(ctr: [u32; 4], key: [u32; 2]) -> [u32; 4] {
    let mut c = ctr;
    let mut k = key;

    for _ in 0..10 {
        c = philox_round(c, k);
        k[0] = k[0].wrapping_add(PHILOX_W32_0);
        k[1] = k[1].wrapping_add(PHILOX_W32_1);
    }

    c
}

/// Word stream of a 4-word bit-generator state
///
/// The first two state words are the Philox key, the last two a 64-bit base
/// counter (low word first). Block `j` hashes counter `base + j`; word `w` of
/// the stream is lane `w % 4` of block `w / 4`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PhiloxStream {
    key: [u32; 2],
    base: u64,
}

impl PhiloxStream {
    /// Stream for a 4-word state
    pub fn new(state: [u32; 4]) -> Self {
        Self {
            key: [state[0], state[1]],
            base: ((state[3] as u64) << 32) | state[2] as u64,
        }
    }

    /// Four words of block `j`
    #[inline]
    pub fn block(&self, j: u64) -> [u32; 4] {
        let counter = self.base.wrapping_add(j);
        let ctr = [(counter & 0xFFFFFFFF) as u32, (counter >> 32) as u32, 0, 0];
        philox4x32_10(ctr, self.key)
    }

    /// Word `w` of the stream
    #[inline]
    pub fn word(&self, w: u64) -> u32 {
        self.block(w / 4)[(w % 4) as usize]
    }
}
