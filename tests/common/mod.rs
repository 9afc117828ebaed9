//! Common test utilities
#![allow(dead_code)]

use prngkey::prelude::*;
use prngkey::prng::{RBG, THREEFRY2X32, UNSAFE_RBG};
use std::collections::HashSet;

/// Names of the built-in implementations
pub const BUILTINS: [&str; 3] = [THREEFRY2X32, RBG, UNSAFE_RBG];

/// Handle for a built-in implementation
pub fn prng(name: &str) -> PrngImpl {
    registry().get(name).unwrap()
}

/// Every built-in implementation
pub fn all_impls() -> Vec<PrngImpl> {
    BUILTINS.iter().map(|name| prng(name)).collect()
}

/// Raw words of every key in a key array, one entry per key
pub fn key_words(keys: &KeyArray) -> Vec<Vec<u32>> {
    (0..keys.numel())
        .map(|i| keys.words_of(i).unwrap().to_vec())
        .collect()
}

/// Assert no two keys in the array are equal
pub fn assert_keys_distinct(keys: &KeyArray, msg: &str) {
    let words = key_words(keys);
    let unique: HashSet<_> = words.iter().collect();
    assert_eq!(unique.len(), words.len(), "{}: duplicate keys", msg);
}

/// Elements of a bit array widened to u64
pub fn bits_as_u64(a: &Array) -> Vec<u64> {
    match a.dtype() {
        DType::U8 => a.to_vec::<u8>().into_iter().map(u64::from).collect(),
        DType::U16 => a.to_vec::<u16>().into_iter().map(u64::from).collect(),
        DType::U32 => a.to_vec::<u32>().into_iter().map(u64::from).collect(),
        DType::U64 => a.to_vec::<u64>(),
    }
}
