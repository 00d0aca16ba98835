//! Table-driven Reed-Solomon backend
//!
//! Works on flat byte buffers with log/antilog lookups, and precomputes the
//! generator polynomial for every ecc length at construction, so encoding is a
//! single synthetic division. Field primitive, generator and first consecutive
//! root are configurable through [`FieldParams`]; with [`FieldParams::BASE3`]
//! the output is byte-identical to the reference backend.

use super::{ecc_len, expect_codeword_len, expect_message_fits, Decoded, EccCodec};
use crate::error::{EccError, Positions, Result, MAX_CODEWORD_LEN};
use crate::galois::GaloisField;
use crate::variant::FieldParams;
use log::{debug, trace};

/// Reed-Solomon codec for codewords of length `n` on an arbitrary GF(2^8)
#[derive(Debug, Clone)]
pub struct PerformanceCodec {
    n: usize,
    params: FieldParams,
    field: GaloisField,
    /// `generators[nsym]`, highest degree first
    generators: Vec<Vec<u8>>,
}

impl PerformanceCodec {
    pub fn new(n: usize, params: FieldParams) -> Result<Self> {
        if !(2..=MAX_CODEWORD_LEN).contains(&n) {
            return Err(EccError::InvalidCodewordLength { n });
        }
        let field = GaloisField::new(params.prim, params.generator)?;

        // Each generator extends the previous one by (x - α^(nsym + fcr))
        let mut generators = Vec::with_capacity(n);
        generators.push(vec![1u8]);
        for nsym in 1..n {
            let previous = &generators[nsym - 1];
            let root = field.alpha_pow((nsym - 1) as i64 + params.fcr as i64);
            let mut next = vec![0u8; previous.len() + 1];
            for (j, &c) in previous.iter().enumerate() {
                next[j] ^= c;
                next[j + 1] ^= field.mul(c, root);
            }
            generators.push(next);
        }

        debug!(
            "Performance codec ready: n={}, prim={:#x}, generator={}, fcr={}",
            n, params.prim, params.generator, params.fcr
        );
        Ok(Self {
            n,
            params,
            field,
            generators,
        })
    }

    /// Generator polynomial producing `nsym` ecc symbols
    pub fn generator(&self, nsym: usize) -> &[u8] {
        &self.generators[nsym]
    }

    /// Horner evaluation of a codeword polynomial
    #[inline]
    fn eval(&self, poly: &[u8], x: u8) -> u8 {
        poly.iter()
            .fold(0u8, |acc, &c| self.field.mul(acc, x) ^ c)
    }

    /// Horner evaluation of a polynomial stored lowest degree first
    #[inline]
    fn eval_ascending(&self, poly: &[u8], x: u8) -> u8 {
        poly.iter()
            .rev()
            .fold(0u8, |acc, &c| self.field.mul(acc, x) ^ c)
    }

    fn syndromes(&self, codeword: &[u8], nsym: usize) -> Vec<u8> {
        let fcr = self.params.fcr as i64;
        (0..nsym as i64)
            .map(|j| self.eval(codeword, self.field.alpha_pow(j + fcr)))
            .collect()
    }

    /// Berlekamp-Massey; returns the locator (lowest degree first) and its length
    fn find_error_locator(&self, syndromes: &[u8]) -> (Vec<u8>, usize) {
        let gf = &self.field;
        let mut current = vec![1u8];
        let mut previous = vec![1u8];
        let mut length = 0usize;
        let mut shift = 1usize;
        let mut previous_discrepancy = 1u8;

        for i in 0..syndromes.len() {
            let discrepancy = (1..=length.min(current.len() - 1))
                .fold(syndromes[i], |d, j| d ^ gf.mul(current[j], syndromes[i - j]));

            if discrepancy == 0 {
                shift += 1;
                continue;
            }

            let coef = gf.div(discrepancy, previous_discrepancy);
            let snapshot = current.clone();
            if current.len() < previous.len() + shift {
                current.resize(previous.len() + shift, 0);
            }
            for (j, &p) in previous.iter().enumerate() {
                current[j + shift] ^= gf.mul(coef, p);
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

        while current.len() > 1 && current[current.len() - 1] == 0 {
            current.pop();
        }
        (current, length)
    }

    /// Correct `codeword` in place, returning the repaired positions
    fn correct(&self, codeword: &mut [u8], nsym: usize) -> Result<Positions> {
        let syndromes = self.syndromes(codeword, nsym);
        if syndromes.iter().all(|&s| s == 0) {
            return Ok(Positions::new());
        }

        let capacity = nsym / 2;
        let (locator, errors) = self.find_error_locator(&syndromes);
        if errors > capacity || locator.len() - 1 != errors {
            debug!(
                "Locator claims {} errors (degree {}), capacity {}",
                errors,
                locator.len() - 1,
                capacity
            );
            return Err(EccError::Uncorrectable {
                capacity,
                positions: Positions::new(),
            });
        }

        // Chien search over the positions that exist in this codeword
        let last = codeword.len() - 1;
        let positions: Positions = (0..codeword.len())
            .filter(|&pos| {
                let x_inv = self.field.alpha_pow(-((last - pos) as i64));
                self.eval_ascending(&locator, x_inv) == 0
            })
            .collect();
        if positions.len() != errors {
            debug!(
                "Chien search found {} roots for {} errors",
                positions.len(),
                errors
            );
            return Err(EccError::Uncorrectable {
                capacity,
                positions,
            });
        }

        // Ω(x) = S(x)Λ(x) mod x^nsym, lowest degree first
        let mut evaluator = vec![0u8; nsym];
        for (i, slot) in evaluator.iter_mut().enumerate() {
            for j in 0..=i.min(locator.len() - 1) {
                *slot ^= self.field.mul(syndromes[i - j], locator[j]);
            }
        }
        // Λ'(x): only odd powers survive in characteristic 2
        let derivative: Vec<u8> = (1..locator.len())
            .map(|i| if i % 2 == 1 { locator[i] } else { 0 })
            .collect();

        let fcr = self.params.fcr as i64;
        for &pos in &positions {
            let power = (last - pos) as i64;
            let x_inv = self.field.alpha_pow(-power);
            let denominator = self.eval_ascending(&derivative, x_inv);
            if denominator == 0 {
                return Err(EccError::Uncorrectable {
                    capacity,
                    positions: positions.clone(),
                });
            }
            let numerator = self.eval_ascending(&evaluator, x_inv);
            let magnitude = self.field.mul(
                self.field.alpha_pow(power * (1 - fcr)),
                self.field.div(numerator, denominator),
            );
            codeword[pos] ^= magnitude;
        }

        if self.syndromes(codeword, nsym).iter().any(|&s| s != 0) {
            return Err(EccError::Uncorrectable {
                capacity,
                positions,
            });
        }
        trace!("Corrected positions {:?}", positions);
        Ok(positions)
    }
}

impl EccCodec for PerformanceCodec {
    fn n(&self) -> usize {
        self.n
    }

    fn encode(&self, message: &[u8], k: usize) -> Result<Vec<u8>> {
        let nsym = ecc_len(self.n, k)?;
        expect_message_fits(message, k)?;
        let generator = self.generator(nsym);

        let mut codeword = vec![0u8; message.len() + nsym];
        codeword[..message.len()].copy_from_slice(message);
        for i in 0..message.len() {
            let coef = codeword[i];
            if coef == 0 {
                continue;
            }
            let log_coef = self.field.log(coef) as i64;
            for (j, &g) in generator.iter().enumerate().skip(1) {
                if g != 0 {
                    codeword[i + j] ^= self.field.alpha_pow(self.field.log(g) as i64 + log_coef);
                }
            }
        }
        codeword[..message.len()].copy_from_slice(message);

        Ok(codeword)
    }

    fn decode(&self, codeword: &[u8], k: usize) -> Result<Decoded> {
        let nsym = ecc_len(self.n, k)?;
        expect_codeword_len(codeword, self.n, k)?;

        let mut repaired = codeword.to_vec();
        let corrected = self.correct(&mut repaired, nsym)?;
        Ok(Decoded::split(repaired, k, corrected))
    }

    fn check(&self, codeword: &[u8], k: usize) -> Result<bool> {
        let nsym = ecc_len(self.n, k)?;
        expect_codeword_len(codeword, self.n, k)?;
        Ok(self.syndromes(codeword, nsym).iter().all(|&s| s == 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(message: &[u8], k: usize) -> Vec<u8> {
        let mut out = vec![0u8; k - message.len()];
        out.extend_from_slice(message);
        out
    }

    #[test]
    fn test_generators_have_expected_roots() {
        let codec = PerformanceCodec::new(20, FieldParams::ADSB_UAT).unwrap();
        let gf = &codec.field;
        let g = codec.generator(6);
        assert_eq!(g.len(), 7);
        assert_eq!(g[0], 1);
        for i in 0..6 {
            let root = gf.alpha_pow(120 + i);
            assert_eq!(codec.eval(g, root), 0);
        }
    }

    #[test]
    fn test_known_answer_adsb_uat() {
        let codec = PerformanceCodec::new(12, FieldParams::ADSB_UAT).unwrap();
        let codeword = codec.encode(&padded(b"hello", 8), 8).unwrap();
        assert_eq!(&codeword[8..], &[0x82, 0xf4, 0x8f, 0x07]);
    }

    #[test]
    fn test_known_answer_base3() {
        let codec = PerformanceCodec::new(12, FieldParams::BASE3).unwrap();
        let codeword = codec.encode(&padded(b"hello", 8), 8).unwrap();
        assert_eq!(&codeword[8..], &[0x7f, 0x18, 0xae, 0xc1]);
    }

    #[test]
    fn test_correct_with_high_fcr() {
        let codec = PerformanceCodec::new(64, FieldParams::ADSB_UAT).unwrap();
        let message: Vec<u8> = (0..48u8).map(|i| i ^ 0x5A).collect();
        let codeword = codec.encode(&message, 48).unwrap();

        let mut damaged = codeword.clone();
        for (i, pos) in [2usize, 11, 30, 47, 50, 55, 60, 63].iter().enumerate() {
            damaged[*pos] ^= (i as u8 + 1) * 17;
        }
        assert!(!codec.check(&damaged, 48).unwrap());

        let decoded = codec.decode(&damaged, 48).unwrap();
        assert_eq!(decoded.message, message);
        assert_eq!(decoded.ecc, &codeword[48..]);
        assert_eq!(decoded.corrected.len(), 8);
    }

    #[test]
    fn test_rejects_invalid_field() {
        let err = PerformanceCodec::new(20, FieldParams::new(0x11B, 2, 0)).unwrap_err();
        assert!(err.is_configuration());
        assert!(matches!(
            PerformanceCodec::new(256, FieldParams::BASE3),
            Err(EccError::InvalidCodewordLength { n: 256 })
        ));
        assert!(matches!(
            PerformanceCodec::new(1, FieldParams::BASE3),
            Err(EccError::InvalidCodewordLength { n: 1 })
        ));
    }
}
