//! Property tests for the key and bit-generation invariants
//!
//! Every property is checked for all built-in implementations:
//!
//! 1. **Determinism**: seeding, splitting and bit generation reproduce bit for bit
//! 2. **Split distinctness**: children differ from each other, the parent and fold_in keys
//! 3. **Batch non-interference**: batched results equal per-key results
//! 4. **Fold-in distinctness**: distinct data give distinct keys
//! 5. **Shape/width contract**: output shape, dtype and shard slices
//! 6. **Round trip**: raw key data wraps back to the same keys

mod common;

use common::{BUILTINS, assert_keys_distinct, bits_as_u64, key_words, prng};
use prngkey::prelude::*;
use proptest::prelude::*;

fn impl_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(BUILTINS.to_vec())
}

fn width() -> impl Strategy<Value = BitWidth> {
    prop::sample::select(BitWidth::ALL.to_vec())
}

fn shape() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..6, 0..4)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn seed_deterministic(name in impl_name(), seed in any::<i64>()) {
        let p = prng(name);
        prop_assert_eq!(p.seed(seed).unwrap(), p.seed(seed).unwrap());
    }

    #[test]
    fn distinct_seeds_distinct_keys(name in impl_name(), a in any::<i64>(), b in any::<i64>()) {
        prop_assume!(a != b);
        let p = prng(name);
        prop_assert_ne!(p.seed(a).unwrap(), p.seed(b).unwrap());
    }

    #[test]
    fn split_distinct(name in impl_name(), seed in any::<i64>(), n in 1usize..48) {
        let p = prng(name);
        let k = p.seed(seed).unwrap();
        let children = p.split(&k, n).unwrap();
        prop_assert_eq!(&children, &p.split(&k, n).unwrap());
        assert_keys_distinct(&children, name);

        let parent = k.words_of(0).unwrap().to_vec();
        for (i, child) in key_words(&children).into_iter().enumerate() {
            prop_assert_ne!(&child, &parent);
            let folded = p.fold_in(&k, i as u32).unwrap();
            prop_assert_ne!(child.as_slice(), folded.words_of(0).unwrap());
        }
    }

    #[test]
    fn split_batch_non_interference(
        name in impl_name(),
        seed in any::<i64>(),
        batch in 1usize..5,
        n in 1usize..6,
    ) {
        let p = prng(name);
        let parents = p.split(&p.seed(seed).unwrap(), batch).unwrap();
        let batched = p.split(&parents, n).unwrap();
        prop_assert_eq!(batched.shape(), &[batch, n][..]);
        for b in 0..batch {
            prop_assert_eq!(batched.get(b).unwrap(), p.split(&parents.get(b).unwrap(), n).unwrap());
        }
    }

    #[test]
    fn fold_in_distinct(name in impl_name(), seed in any::<i64>(), a in any::<u32>(), b in any::<u32>()) {
        prop_assume!(a != b);
        let p = prng(name);
        let k = p.seed(seed).unwrap();
        prop_assert_ne!(p.fold_in(&k, a).unwrap(), p.fold_in(&k, b).unwrap());
    }

    #[test]
    fn fold_in_differs_from_split(name in impl_name(), seed in any::<i64>(), a in 0u32..32, extra in 1usize..8) {
        let p = prng(name);
        let k = p.seed(seed).unwrap();
        let children = p.split(&k, a as usize + extra).unwrap();
        let folded = p.fold_in(&k, a).unwrap();
        prop_assert_ne!(children.words_of(a as usize).unwrap(), folded.words_of(0).unwrap());
    }

    #[test]
    fn random_bits_contract(name in impl_name(), seed in any::<i64>(), w in width(), shape in shape()) {
        let p = prng(name);
        let k = p.seed(seed).unwrap();
        let a = p.random_bits(&k, w.bits(), &shape).unwrap();
        prop_assert_eq!(a.shape(), shape.as_slice());
        prop_assert_eq!(a.dtype(), w.dtype());
        prop_assert!(bits_as_u64(&a).iter().all(|&x| x & !w.mask() == 0));
        prop_assert_eq!(a, p.random_bits(&k, w.bits(), &shape).unwrap());
    }

    #[test]
    fn shard_matches_slice(
        name in impl_name(),
        seed in any::<i64>(),
        w in width(),
        rows in 1usize..9,
        cols in 1usize..9,
        r in (0usize..9, 0usize..9),
        c in (0usize..9, 0usize..9),
    ) {
        let (r0, r1) = (r.0 % (rows + 1), r.1 % (rows + 1));
        let (c0, c1) = (c.0 % (cols + 1), c.1 % (cols + 1));
        let ranges = [r0.min(r1)..r0.max(r1), c0.min(c1)..c0.max(c1)];

        let p = prng(name);
        let k = p.seed(seed).unwrap();
        let full = p.random_bits(&k, w.bits(), &[rows, cols]).unwrap();
        let shard = p.random_bits_shard(&k, w.bits(), &[rows, cols], &ranges).unwrap();
        prop_assert_eq!(shard, full.slice(&ranges).unwrap());
    }

    #[test]
    fn wrap_round_trip(name in impl_name(), words in prop::collection::vec(any::<u32>(), 1..5)) {
        let p = prng(name);
        let w = p.key_words();
        let data: Vec<u32> = words.iter().cycle().take(words.len() * w).copied().collect();
        let raw = Array::from_vec(data, &[words.len(), w]).unwrap();

        let once = p.wrap_key_data(&raw).unwrap();
        let twice = p.wrap_key_data(&key_data(&once)).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(key_data(&twice), raw);
    }
}

// ============================================================================
// End-to-end Scenario
// ============================================================================

#[test]
fn seed_1701_scenario() {
    let run = || {
        let k0 = key_with_impl(1701, Some("threefry2x32")).unwrap();
        let children = split(&k0, 2).unwrap();
        let (k1, k2) = (children.get(0).unwrap(), children.get(1).unwrap());
        let b1 = random_bits(&k1, 32, &[1]).unwrap();
        let b2 = random_bits(&k2, 32, &[1]).unwrap();
        (k1, k2, b1, b2)
    };

    let (k1, k2, b1, b2) = run();
    assert_ne!(k1, k2);
    assert_ne!(b1, b2);
    assert_eq!(run(), (k1, k2, b1, b2));
}
