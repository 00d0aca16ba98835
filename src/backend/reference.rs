//! Reference Reed-Solomon backend
//!
//! Correctness-first codec over the base-3 field (primitive polynomial 0x11B,
//! generator 3, first consecutive root 1). All arithmetic goes through
//! [`Polynomial`] and [`Gf256`] values rather than flat tables, and the
//! standard encoder checks every codeword it produces.
//!
//! Decoding follows the classic pipeline:
//! 1. Syndromes `S_j = c(α^(j+1))`
//! 2. Berlekamp-Massey for the error locator `Λ(x)`
//! 3. Chien search for the roots of `Λ(x)` among valid positions
//! 4. Forney's formula for the error magnitudes

use super::{ecc_len, expect_codeword_len, expect_message_fits, Decoded, EccCodec, EccVerify};
use crate::error::{validate_code_parameters, EccError, Positions, Result};
use crate::galois::Gf256;
use crate::polynomial::Polynomial;
use log::{debug, trace};
use rustc_hash::FxHashMap as HashMap;
use std::borrow::Cow;

/// First consecutive root of the generator polynomial
const FCR: i64 = 1;

/// Reed-Solomon coder for fixed `(n, k)` over the base-3 field
#[derive(Debug, Clone)]
pub struct ReferenceCodec {
    n: usize,
    generators: HashMap<usize, Polynomial>,
}

impl ReferenceCodec {
    pub fn new(n: usize, k: usize) -> Result<Self> {
        validate_code_parameters(n, k)?;

        let mut generators = HashMap::default();
        generators.insert(k, Self::generator_poly(n - k));
        debug!("Reference codec ready: n={}, k={}", n, k);

        Ok(Self { n, generators })
    }

    /// `g(x) = (x - α^1)(x - α^2)...(x - α^nsym)`
    pub fn generator_poly(nsym: usize) -> Polynomial {
        (0..nsym as i64).fold(Polynomial::one(), |g, i| {
            let factor = Polynomial::new(vec![Gf256::ONE, Gf256::alpha(i + FCR)]);
            &g * &factor
        })
    }

    /// Generator for `k`, derived on demand when it was not precomputed
    fn generator(&self, k: usize) -> Cow<'_, Polynomial> {
        match self.generators.get(&k) {
            Some(g) => Cow::Borrowed(g),
            None => {
                trace!("Deriving generator polynomial for k={}", k);
                Cow::Owned(Self::generator_poly(self.n - k))
            }
        }
    }

    fn syndromes(received: &Polynomial, nsym: usize) -> Vec<Gf256> {
        (0..nsym as i64)
            .map(|j| received.eval(Gf256::alpha(j + FCR)))
            .collect()
    }

    fn syndromes_clear(codeword: &[u8], nsym: usize) -> bool {
        Self::syndromes(&Polynomial::from_bytes(codeword), nsym)
            .iter()
            .all(Gf256::is_zero)
    }

    /// Encode with fast synthetic division, skipping the codeword self-check
    pub fn encode_fast(&self, message: &[u8], k: usize) -> Result<Vec<u8>> {
        let nsym = ecc_len(self.n, k)?;
        expect_message_fits(message, k)?;
        let generator = self.generator(k);

        let mut codeword = message.to_vec();
        codeword.resize(message.len() + nsym, 0);
        for i in 0..message.len() {
            let coef = Gf256::new(codeword[i]);
            if coef.is_zero() {
                continue;
            }
            for (j, &g) in generator.coefficients().iter().enumerate().skip(1) {
                codeword[i + j] ^= (g * coef).value();
            }
        }
        codeword[..message.len()].copy_from_slice(message);

        Ok(codeword)
    }

    /// Error locator `Λ(x)` and the number of errors it claims
    fn berlekamp_massey(syndromes: &[Gf256]) -> (Polynomial, usize) {
        // Ascending coefficients while iterating: current[i] is the x^i term
        let mut current = vec![Gf256::ONE];
        let mut previous = vec![Gf256::ONE];
        let mut length = 0usize;
        let mut shift = 1usize;
        let mut previous_discrepancy = Gf256::ONE;

        for i in 0..syndromes.len() {
            let mut discrepancy = syndromes[i];
            for j in 1..=length.min(current.len() - 1) {
                discrepancy += current[j] * syndromes[i - j];
            }

            if discrepancy.is_zero() {
                shift += 1;
                continue;
            }

            let coef = discrepancy / previous_discrepancy;
            let snapshot = current.clone();
            if current.len() < previous.len() + shift {
                current.resize(previous.len() + shift, Gf256::ZERO);
            }
            for (j, &p) in previous.iter().enumerate() {
                current[j + shift] -= coef * p;
            }

            if 2 * length <= i {
                length = i + 1 - length;
                previous = snapshot;
                previous_discrepancy = discrepancy;
                shift = 1;
            } else {
                shift += 1;
            }
        }

        (Polynomial::new(current.into_iter().rev().collect()), length)
    }
}

impl EccCodec for ReferenceCodec {
    fn n(&self) -> usize {
        self.n
    }

    /// Polynomial long-division encoder; the output is checked before it is returned
    fn encode(&self, message: &[u8], k: usize) -> Result<Vec<u8>> {
        let nsym = ecc_len(self.n, k)?;
        expect_message_fits(message, k)?;
        let generator = self.generator(k);

        let shifted = Polynomial::from_bytes(message).shift(nsym);
        let (_, remainder) = shifted.divmod(&generator);

        let mut codeword = message.to_vec();
        codeword.extend(remainder.to_bytes_padded(nsym));

        if !Self::syndromes_clear(&codeword, nsym) {
            return Err(EccError::EncodeSelfCheck { k });
        }
        Ok(codeword)
    }

    fn decode(&self, codeword: &[u8], k: usize) -> Result<Decoded> {
        let nsym = ecc_len(self.n, k)?;
        expect_codeword_len(codeword, self.n, k)?;

        let syndromes = Self::syndromes(&Polynomial::from_bytes(codeword), nsym);
        if syndromes.iter().all(Gf256::is_zero) {
            return Ok(Decoded::split(codeword.to_vec(), k, Positions::new()));
        }

        let capacity = nsym / 2;
        let uncorrectable = |positions: Positions| EccError::Uncorrectable {
            capacity,
            positions,
        };

        let (locator, errors) = Self::berlekamp_massey(&syndromes);
        if errors > capacity || locator.degree() != errors {
            debug!(
                "Locator claims {} errors (degree {}), capacity {}",
                errors,
                locator.degree(),
                capacity
            );
            return Err(uncorrectable(Positions::new()));
        }

        let last = codeword.len() - 1;
        let positions: Positions = (0..codeword.len())
            .filter(|&pos| {
                locator
                    .eval(Gf256::alpha(-((last - pos) as i64)))
                    .is_zero()
            })
            .collect();
        if positions.len() != errors {
            debug!(
                "Chien search found {} roots for {} errors",
                positions.len(),
                errors
            );
            return Err(uncorrectable(positions));
        }

        // Ω(x) = S(x)Λ(x) mod x^nsym
        let syndrome_poly = Polynomial::new(syndromes.iter().rev().copied().collect());
        let evaluator = (&syndrome_poly * &locator).low_terms(nsym);
        let derivative = locator.formal_derivative();

        let mut repaired = codeword.to_vec();
        for &pos in &positions {
            let power = (last - pos) as i64;
            let x_inv = Gf256::alpha(-power);
            let denominator = derivative.eval(x_inv);
            if denominator.is_zero() {
                return Err(uncorrectable(positions.clone()));
            }
            let magnitude =
                Gf256::alpha(power * (1 - FCR)) * evaluator.eval(x_inv) / denominator;
            repaired[pos] ^= magnitude.value();
        }

        if !Self::syndromes_clear(&repaired, nsym) {
            return Err(uncorrectable(positions));
        }

        trace!("Corrected positions {:?}", positions);
        Ok(Decoded::split(repaired, k, positions))
    }

    fn check(&self, codeword: &[u8], k: usize) -> Result<bool> {
        let nsym = ecc_len(self.n, k)?;
        expect_codeword_len(codeword, self.n, k)?;
        Ok(Self::syndromes_clear(codeword, nsym))
    }
}

impl EccVerify for ReferenceCodec {
    fn verify(&self, codeword: &[u8], k: usize) -> Result<bool> {
        ecc_len(self.n, k)?;
        expect_codeword_len(codeword, self.n, k)?;
        let (_, remainder) = Polynomial::from_bytes(codeword).divmod(&self.generator(k));
        Ok(remainder.is_zero())
    }
}
