//! Property-based tests for the ECC manager
//!
//! These tests use proptest to check the manager contract over random
//! messages, code sizes and error patterns.

use eccman::galois::Gf256;
use eccman::{EccManager, Variant};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};

fn variant_strategy() -> impl Strategy<Value = Variant> {
    prop::sample::select(Variant::ALL.to_vec())
}

/// `(n, k, message)` with at least two ecc symbols and a message of at most k bytes
fn code_and_message() -> impl Strategy<Value = (usize, usize, Vec<u8>)> {
    (4usize..=255)
        .prop_flat_map(|n| (Just(n), 1usize..=n - 2))
        .prop_flat_map(|(n, k)| (Just(n), Just(k), prop::collection::vec(any::<u8>(), 0..=k)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: GF(2^8) multiplication distributes over addition
    #[test]
    fn prop_gf256_distributive(a in any::<u8>(), b in any::<u8>(), c in any::<u8>()) {
        let (a, b, c) = (Gf256::new(a), Gf256::new(b), Gf256::new(c));
        prop_assert_eq!(a * (b + c), a * b + a * c);
    }

    /// Property: every nonzero element times its inverse is one
    #[test]
    fn prop_gf256_inverse(a in 1u8..=255) {
        let a = Gf256::new(a);
        prop_assert_eq!(a * a.inverse(), Gf256::ONE);
    }

    /// Property: decode(message, encode(message)) returns the message unchanged
    #[test]
    fn prop_round_trip(variant in variant_strategy(), (n, k, message) in code_and_message()) {
        let manager = EccManager::new(n, k, variant).unwrap();
        let ecc = manager.encode(&message, None).unwrap();
        prop_assert_eq!(ecc.len(), n - k);

        let decoded = manager.decode(&message, &ecc, None).unwrap();
        prop_assert_eq!(&decoded.message, &message);
        prop_assert_eq!(&decoded.ecc, &ecc);
        prop_assert!(decoded.was_intact());
        prop_assert!(manager.check(&message, &ecc, None).unwrap());
    }

    /// Property: the default-family variants emit identical ecc blocks
    #[test]
    fn prop_default_family_interchangeable((n, k, message) in code_and_message()) {
        let reference = EccManager::new(n, k, Variant::ReferenceStandard).unwrap();
        let expected = reference.encode(&message, None).unwrap();

        for variant in [Variant::ReferenceFast, Variant::PerformanceCompatible] {
            let manager = EccManager::new(n, k, variant).unwrap();
            prop_assert_eq!(manager.encode(&message, None).unwrap(), expected.clone());
        }
    }

    /// Property: padding a message that is already k bytes long changes nothing
    #[test]
    fn prop_pad_idempotent((n, k, message) in code_and_message()) {
        let manager = EccManager::new(n, k, Variant::ReferenceStandard).unwrap();
        let once = manager.pad(&message, None);
        prop_assert_eq!(once.message.len(), k);
        prop_assert_eq!(once.padding_len(), k - message.len());

        let twice = manager.pad(&once.message, None);
        prop_assert_eq!(&twice.message, &once.message);
        prop_assert_eq!(twice.padding, None);
    }

    /// Property: up to floor((n-k)/2) symbol errors are always repaired
    #[test]
    fn prop_corrects_within_capacity(
        variant in variant_strategy(),
        (n, k, message) in code_and_message(),
        seed in any::<u64>(),
    ) {
        let manager = EccManager::new(n, k, variant).unwrap();
        let ecc = manager.encode(&message, None).unwrap();

        let mut rng = StdRng::seed_from_u64(seed);
        let mut codeword = message.clone();
        codeword.extend_from_slice(&ecc);
        let errors = rng.random_range(0..=(n - k) / 2).min(codeword.len());
        for pos in sample(&mut rng, codeword.len(), errors).iter() {
            codeword[pos] ^= rng.random_range(1..=255u8);
        }
        let damaged_ecc = codeword.split_off(message.len());

        let decoded = manager.decode(&codeword, &damaged_ecc, None).unwrap();
        prop_assert_eq!(&decoded.message, &message);
        prop_assert_eq!(&decoded.ecc, &ecc);
        prop_assert_eq!(decoded.corrected.len(), errors);
    }

    /// Property: a single flipped symbol always fails check
    #[test]
    fn prop_check_detects_single_error(
        variant in variant_strategy(),
        (n, k, message) in code_and_message(),
        seed in any::<u64>(),
    ) {
        prop_assume!(!message.is_empty());
        let manager = EccManager::new(n, k, variant).unwrap();
        let ecc = manager.encode(&message, None).unwrap();

        let mut rng = StdRng::seed_from_u64(seed);
        let mut damaged = message.clone();
        let pos = rng.random_range(0..damaged.len());
        damaged[pos] ^= rng.random_range(1..=255u8);
        prop_assert!(!manager.check(&damaged, &ecc, None).unwrap());
    }
}
