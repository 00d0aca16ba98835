//! Integration tests for the ECC manager facade
//!
//! Covers padding, encode/decode round trips, cross-variant compatibility,
//! error correction limits, check/verify and descriptions.

use eccman::{EccError, EccManager, FieldParams, Variant};
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};

const DEFAULT_FAMILY: [Variant; 3] = [
    Variant::ReferenceStandard,
    Variant::ReferenceFast,
    Variant::PerformanceCompatible,
];

/// Flip `count` distinct symbols of message + ecc, returning the damaged pair
fn damage(
    message: &[u8],
    ecc: &[u8],
    count: usize,
    rng: &mut StdRng,
) -> (Vec<u8>, Vec<u8>) {
    let mut codeword = message.to_vec();
    codeword.extend_from_slice(ecc);
    for pos in sample(rng, codeword.len(), count).iter() {
        codeword[pos] ^= rng.random_range(1..=255u8);
    }
    let ecc = codeword.split_off(message.len());
    (codeword, ecc)
}

fn random_message(len: usize, rng: &mut StdRng) -> Vec<u8> {
    (0..len).map(|_| rng.random::<u8>()).collect()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_construction_rejects_bad_parameters() {
    for (n, k) in [(255, 0), (100, 100), (100, 150), (300, 200)] {
        let err = EccManager::new(n, k, Variant::ReferenceStandard).unwrap_err();
        assert!(err.is_configuration(), "n={} k={} gave {:?}", n, k, err);
    }
}

#[test]
fn test_construction_rejects_bad_field_params() {
    let err = EccManager::with_field_params(
        255,
        223,
        Variant::PerformanceStandalone,
        FieldParams::new(0x11B, 2, 0),
    )
    .unwrap_err();
    assert!(matches!(err, EccError::InvalidFieldParams { .. }));
}

#[test]
fn test_default_family_ignores_field_params() {
    let manager = EccManager::with_field_params(
        40,
        30,
        Variant::ReferenceStandard,
        FieldParams::new(0x11D, 2, 0),
    )
    .unwrap();
    assert_eq!(manager.field_params(), FieldParams::BASE3);
}

#[test]
fn test_unknown_variant_is_a_configuration_error() {
    let err = "9".parse::<Variant>().unwrap_err();
    assert!(err.is_configuration());
}

// ============================================================================
// Padding
// ============================================================================

#[test]
fn test_pad_is_idempotent_at_full_length() {
    let manager = EccManager::new(30, 20, Variant::ReferenceStandard).unwrap();
    let message = [7u8; 20];
    let first = manager.pad(&message, None);
    assert_eq!(first.padding, None);
    let second = manager.pad(&first.message, None);
    assert_eq!(first, second);
}

#[test]
fn test_pad_honors_k_override() {
    let manager = EccManager::new(30, 20, Variant::ReferenceStandard).unwrap();
    let padded = manager.pad(b"ab", Some(5));
    assert_eq!(padded.message.as_ref(), b"\0\0\0ab");
    assert_eq!(padded.padding, Some(3));
}

// ============================================================================
// Encode / decode
// ============================================================================

#[test]
fn test_hello_scenario() {
    let manager = EccManager::new(255, 223, Variant::ReferenceStandard).unwrap();
    let ecc = manager.encode(b"hello", None).unwrap();
    assert_eq!(ecc.len(), 32);
    assert_eq!(
        hex::encode(&ecc),
        "6c257269a4d3f1f4f901302fb9a0303be252fd79b2ad7648035e96507020726a"
    );

    // Damage 5 symbols of the full 255-byte codeword, padding included
    let padded = manager.pad(b"hello", None);
    let mut codeword = padded.message.into_owned();
    codeword.extend_from_slice(&ecc);
    for pos in [0usize, 100, 219, 222, 240] {
        codeword[pos] ^= 0x3C;
    }
    let (message, damaged_ecc) = codeword.split_at(223);

    let decoded = manager.decode(message, damaged_ecc, None).unwrap();
    let mut expected = vec![0u8; 218];
    expected.extend_from_slice(b"hello");
    assert_eq!(decoded.message, expected);
    assert_eq!(decoded.ecc, ecc);
    assert_eq!(decoded.corrected.len(), 5);
}

#[test]
fn test_short_message_round_trip_keeps_length() {
    let mut rng = StdRng::seed_from_u64(7);
    for variant in Variant::ALL {
        let manager = EccManager::new(255, 223, variant).unwrap();
        for len in [0usize, 1, 5, 100, 222, 223] {
            let message = random_message(len, &mut rng);
            let ecc = manager.encode(&message, None).unwrap();
            assert_eq!(ecc.len(), 32);

            let decoded = manager.decode(&message, &ecc, None).unwrap();
            assert_eq!(decoded.message, message, "variant {} len {}", variant, len);
            assert_eq!(decoded.ecc, ecc);
            assert!(decoded.was_intact());
        }
    }
}

#[test]
fn test_leading_nulls_survive_round_trip() {
    let manager = EccManager::new(50, 40, Variant::ReferenceStandard).unwrap();
    let message = b"\0\0\0payload";
    let ecc = manager.encode(message, None).unwrap();

    let mut damaged = message.to_vec();
    damaged[5] ^= 0x11;
    let decoded = manager.decode(&damaged, &ecc, None).unwrap();
    assert_eq!(decoded.message, message);
}

#[test]
fn test_default_family_produces_identical_ecc() {
    let mut rng = StdRng::seed_from_u64(42);
    for (n, k) in [(255, 223), (64, 40), (12, 8), (3, 1)] {
        let managers: Vec<_> = DEFAULT_FAMILY
            .iter()
            .map(|&v| EccManager::new(n, k, v).unwrap())
            .collect();
        for _ in 0..5 {
            let message = random_message(k, &mut rng);
            let expected = managers[0].encode(&message, None).unwrap();
            for manager in &managers[1..] {
                assert_eq!(
                    manager.encode(&message, None).unwrap(),
                    expected,
                    "variant {} differs for n={} k={}",
                    manager.variant(),
                    n,
                    k
                );
            }
        }
    }
}

#[test]
fn test_default_family_decodes_each_others_ecc() {
    let mut rng = StdRng::seed_from_u64(3);
    let managers: Vec<_> = DEFAULT_FAMILY
        .iter()
        .map(|&v| EccManager::new(100, 80, v).unwrap())
        .collect();

    for encoder in &managers {
        let message = random_message(80, &mut rng);
        let ecc = encoder.encode(&message, None).unwrap();
        for decoder in &managers {
            let (damaged, damaged_ecc) = damage(&message, &ecc, 10, &mut rng);
            let decoded = decoder.decode(&damaged, &damaged_ecc, None).unwrap();
            assert_eq!(decoded.message, message);
            assert_eq!(decoded.ecc, ecc);
        }
    }
}

#[test]
fn test_standalone_differs_from_default_family() {
    let reference = EccManager::new(255, 223, Variant::ReferenceStandard).unwrap();
    let standalone = EccManager::new(255, 223, Variant::PerformanceStandalone).unwrap();
    let message = b"the same bytes";
    assert_ne!(
        reference.encode(message, None).unwrap(),
        standalone.encode(message, None).unwrap()
    );
}

#[test]
fn test_correction_at_capacity_for_every_variant() {
    let mut rng = StdRng::seed_from_u64(11);
    for variant in Variant::ALL {
        let manager = EccManager::new(255, 223, variant).unwrap();
        let message = random_message(223, &mut rng);
        let ecc = manager.encode(&message, None).unwrap();

        let (damaged, damaged_ecc) = damage(&message, &ecc, 16, &mut rng);
        let decoded = manager.decode(&damaged, &damaged_ecc, None).unwrap();
        assert_eq!(decoded.message, message, "variant {}", variant);
        assert_eq!(decoded.ecc, ecc);
        assert_eq!(decoded.corrected.len(), 16);
    }
}

#[test]
fn test_too_many_errors_is_uncorrectable() {
    let mut rng = StdRng::seed_from_u64(99);
    for variant in Variant::ALL {
        let manager = EccManager::new(255, 223, variant).unwrap();
        let message = random_message(223, &mut rng);
        let ecc = manager.encode(&message, None).unwrap();

        for errors in [17usize, 20, 40] {
            let (damaged, damaged_ecc) = damage(&message, &ecc, errors, &mut rng);
            let err = manager.decode(&damaged, &damaged_ecc, None).unwrap_err();
            match err {
                EccError::Uncorrectable { capacity, .. } => assert_eq!(capacity, 16),
                other => panic!("variant {}: unexpected {:?}", variant, other),
            }
        }
    }
}

#[test]
fn test_short_message_decode_never_returns_bytes_failing_check() {
    // t=2; three errors in the six visible symbols can steer the decoder
    // towards a codeword that differs inside the zero padding
    let mut rng = StdRng::seed_from_u64(2024);
    for variant in Variant::ALL {
        let manager = EccManager::new(12, 8, variant).unwrap();
        let message = b"ab";
        let ecc = manager.encode(message, None).unwrap();

        for _ in 0..5000 {
            let (damaged, damaged_ecc) = damage(message, &ecc, 3, &mut rng);
            match manager.decode(&damaged, &damaged_ecc, None) {
                Ok(decoded) => {
                    assert_eq!(decoded.message.len(), message.len());
                    assert!(
                        manager.check(&decoded.message, &decoded.ecc, None).unwrap(),
                        "variant {}: decode returned {:?} with ecc {:?}",
                        variant,
                        decoded.message,
                        decoded.ecc
                    );
                    assert!(decoded.corrected.iter().all(|&pos| pos < 6));
                }
                Err(err) => assert!(err.is_uncorrectable(), "variant {}: {:?}", variant, err),
            }
        }
    }
}

#[test]
fn test_uncorrectable_positions_are_relative_to_caller_data() {
    let mut rng = StdRng::seed_from_u64(512);
    for variant in Variant::ALL {
        let manager = EccManager::new(255, 223, variant).unwrap();
        let message = random_message(100, &mut rng);
        let ecc = manager.encode(&message, None).unwrap();
        let visible = message.len() + ecc.len();

        for errors in [17usize, 30, 60] {
            let (damaged, damaged_ecc) = damage(&message, &ecc, errors, &mut rng);
            match manager.decode(&damaged, &damaged_ecc, None).unwrap_err() {
                EccError::Uncorrectable { positions, .. } => assert!(
                    positions.iter().all(|&pos| pos < visible),
                    "variant {}: positions {:?} outside {} caller symbols",
                    variant,
                    positions,
                    visible
                ),
                other => panic!("variant {}: unexpected {:?}", variant, other),
            }
        }
    }
}

#[test]
fn test_k_override() {
    let manager = EccManager::new(60, 40, Variant::PerformanceCompatible).unwrap();
    let message = b"override";
    let ecc = manager.encode(message, Some(30)).unwrap();
    assert_eq!(ecc.len(), 30);

    let reference = EccManager::new(60, 30, Variant::ReferenceStandard).unwrap();
    assert_eq!(reference.encode(message, None).unwrap(), ecc);

    let mut damaged = message.to_vec();
    damaged[0] = b'O';
    let decoded = manager.decode(&damaged, &ecc, Some(30)).unwrap();
    assert_eq!(decoded.message, message);

    assert!(manager.encode(message, Some(0)).is_err());
    assert!(manager.encode(message, Some(60)).is_err());
}

#[test]
fn test_length_errors() {
    let manager = EccManager::new(30, 20, Variant::ReferenceStandard).unwrap();
    assert!(matches!(
        manager.encode(&[1u8; 21], None),
        Err(EccError::MessageTooLong { len: 21, k: 20 })
    ));
    assert!(matches!(
        manager.decode(b"abc", &[0u8; 9], None),
        Err(EccError::EccLengthMismatch {
            expected: 10,
            actual: 9
        })
    ));
    assert!(manager.check(&[0u8; 25], &[0u8; 10], None).is_err());
}

// ============================================================================
// Check / verify
// ============================================================================

#[test]
fn test_check_before_and_after_repair() {
    for variant in Variant::ALL {
        let manager = EccManager::new(40, 28, variant).unwrap();
        let message = b"integrity matters";
        let ecc = manager.encode(message, None).unwrap();
        assert!(manager.check(message, &ecc, None).unwrap());

        let mut tampered = message.to_vec();
        tampered[4] ^= 0x01;
        assert!(!manager.check(&tampered, &ecc, None).unwrap());

        let decoded = manager.decode(&tampered, &ecc, None).unwrap();
        assert!(manager.check(&decoded.message, &decoded.ecc, None).unwrap());
    }
}

#[test]
fn test_check_detects_ecc_damage() {
    let manager = EccManager::new(40, 28, Variant::PerformanceStandalone).unwrap();
    let message = b"ecc side";
    let mut ecc = manager.encode(message, None).unwrap();
    ecc[11] ^= 0x80;
    assert!(!manager.check(message, &ecc, None).unwrap());
}

#[test]
fn test_verifier_only_on_reference_variants() {
    for variant in Variant::ALL {
        let manager = EccManager::new(40, 28, variant).unwrap();
        assert_eq!(manager.verifier().is_some(), variant.supports_verify());
    }

    let manager = EccManager::new(40, 28, Variant::ReferenceFast).unwrap();
    let verifier = manager.verifier().unwrap();
    let message = b"verify me";
    let ecc = manager.encode(message, None).unwrap();
    assert!(verifier.verify(message, &ecc, None).unwrap());

    let mut tampered_ecc = ecc.clone();
    tampered_ecc[0] ^= 0xFF;
    assert!(!verifier.verify(message, &tampered_ecc, None).unwrap());
}

// ============================================================================
// Description
// ============================================================================

#[test]
fn test_descriptions() {
    let base3 = "Reed-Solomon with polynomials in Galois field 256 (2^8) of base 3.";
    for variant in [
        Variant::ReferenceStandard,
        Variant::ReferenceFast,
        Variant::PerformanceCompatible,
    ] {
        assert_eq!(EccManager::new(255, 223, variant).unwrap().description(), base3);
    }

    let standalone = EccManager::new(255, 223, Variant::PerformanceStandalone).unwrap();
    assert_eq!(
        standalone.description(),
        "Reed-Solomon with polynomials in Galois field 256 (2^8) under US FAA ADSB UAT RS FEC standard with prim=391 and fcr=120."
    );

    let custom = EccManager::with_field_params(
        255,
        223,
        Variant::PerformanceStandalone,
        FieldParams::new(0x11D, 2, 0),
    )
    .unwrap();
    assert_eq!(
        custom.description(),
        "Reed-Solomon with polynomials in Galois field 256 (2^8) with prim=285, generator=2 and fcr=0."
    );
}
