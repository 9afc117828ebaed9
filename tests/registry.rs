//! Integration tests for registering custom implementations

use prngkey::error::Result;
use prngkey::prelude::*;
use prngkey::tensor::BitsMut;

/// Toy algorithm: keys are one word, children and bits are arithmetic sequences
#[derive(Debug)]
struct Stepper;

impl PrngAlgorithm for Stepper {
    fn name(&self) -> &'static str {
        "stepper"
    }

    fn tag(&self) -> &'static str {
        "step"
    }

    fn key_words(&self) -> usize {
        1
    }

    fn shard_invariant(&self) -> bool {
        true
    }

    fn supports_width(&self, width: BitWidth) -> bool {
        width == BitWidth::W32
    }

    fn seed(&self, seed: Seed, out: &mut [u32]) -> Result<()> {
        let s = u32::try_from(seed.get())
            .map_err(|_| Error::invalid_seed(seed.get(), self.name(), "seed must fit in u32"))?;
        out[0] = s;
        Ok(())
    }

    fn split(&self, key: &[u32], out: &mut [u32]) {
        for (i, o) in out.iter_mut().enumerate() {
            *o = key[0].wrapping_mul(31).wrapping_add(i as u32 + 1);
        }
    }

    fn fold_in(&self, key: &[u32], data: u32, out: &mut [u32]) {
        out[0] = key[0].rotate_left(7) ^ data;
    }

    fn random_bits(&self, key: &[u32], offset: u64, out: BitsMut<'_>) {
        if let BitsMut::U32(out) = out {
            for (i, o) in out.iter_mut().enumerate() {
                *o = key[0].wrapping_add((offset + i as u64) as u32);
            }
        }
    }
}

#[test]
fn test_register_and_use_custom_impl() {
    let p = registry().register(Stepper).unwrap();
    assert!(registry().contains("stepper"));
    assert!(registry().names().contains(&"stepper"));
    assert!(matches!(
        registry().register(Stepper),
        Err(Error::DuplicateImpl { name: "stepper" })
    ));

    let k = key_with_impl(10, Some("stepper")).unwrap();
    assert_eq!(k.dtype_name(), "key<step>");
    assert_eq!(key_data(&k).to_vec::<u32>(), vec![10]);

    let children = split(&k, 3).unwrap();
    assert_eq!(key_data(&children).to_vec::<u32>(), vec![311, 312, 313]);

    let bits = random_bits(&k, 32, &[4]).unwrap();
    assert_eq!(bits.to_vec::<u32>(), vec![10, 11, 12, 13]);
    let shard = random_bits_shard(&k, 32, &[4], &[2..4]).unwrap();
    assert_eq!(shard.to_vec::<u32>(), vec![12, 13]);

    assert!(matches!(
        random_bits(&k, 8, &[4]),
        Err(Error::UnsupportedWidth { width: 8, .. })
    ));
    assert!(matches!(
        p.seed(-1),
        Err(Error::InvalidSeed {
            impl_name: "stepper",
            ..
        })
    ));

    let fry = key(0).unwrap();
    assert!(matches!(
        p.split(&fry, 2),
        Err(Error::KeyImplMismatch {
            expected: "stepper",
            ..
        })
    ));
}
