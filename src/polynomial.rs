//! Polynomials over the base-3 GF(2^8) field
//!
//! Coefficients are stored highest degree first, matching the byte order of a
//! codeword: `codeword[0]` is the coefficient of `x^(n-1)`.

use crate::galois::Gf256;
use std::ops::{Add, Mul};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    coefficients: Vec<Gf256>,
}

impl Polynomial {
    /// Build from coefficients (highest degree first); leading zeros are dropped
    pub fn new(coefficients: Vec<Gf256>) -> Self {
        let first_nonzero = coefficients
            .iter()
            .position(|c| !c.is_zero())
            .unwrap_or(coefficients.len());
        let mut coefficients = coefficients[first_nonzero..].to_vec();
        if coefficients.is_empty() {
            coefficients.push(Gf256::ZERO);
        }
        Self { coefficients }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(bytes.iter().copied().map(Gf256::new).collect())
    }

    pub fn one() -> Self {
        Self {
            coefficients: vec![Gf256::ONE],
        }
    }

    pub fn coefficients(&self) -> &[Gf256] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.len() == 1 && self.coefficients[0].is_zero()
    }

    /// Coefficient of `x^power`
    pub fn coefficient(&self, power: usize) -> Gf256 {
        if power > self.degree() {
            return Gf256::ZERO;
        }
        self.coefficients[self.degree() - power]
    }

    /// Serialize to exactly `len` bytes, left-padding with zeros
    ///
    /// Panics if the polynomial has more than `len` significant coefficients.
    pub fn to_bytes_padded(&self, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        if self.is_zero() {
            return out;
        }
        assert!(self.coefficients.len() <= len);
        let offset = len - self.coefficients.len();
        for (slot, c) in out[offset..].iter_mut().zip(&self.coefficients) {
            *slot = c.value();
        }
        out
    }

    /// Multiply by `x^power`
    pub fn shift(&self, power: usize) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        let mut coefficients = self.coefficients.clone();
        coefficients.resize(coefficients.len() + power, Gf256::ZERO);
        Self { coefficients }
    }

    /// Formal derivative; in characteristic 2 only odd powers survive
    pub fn formal_derivative(&self) -> Self {
        let degree = self.degree();
        if degree == 0 {
            return Polynomial::new(vec![Gf256::ZERO]);
        }
        Self::new(
            (1..=degree)
                .rev()
                .map(|power| {
                    if power % 2 == 1 {
                        self.coefficient(power)
                    } else {
                        Gf256::ZERO
                    }
                })
                .collect(),
        )
    }

    /// Remainder modulo `x^count` (the `count` lowest-degree terms)
    pub fn low_terms(&self, count: usize) -> Self {
        Self::new((0..count).rev().map(|power| self.coefficient(power)).collect())
    }

    /// Horner evaluation at `x`
    pub fn eval(&self, x: Gf256) -> Gf256 {
        self.coefficients
            .iter()
            .fold(Gf256::ZERO, |acc, &c| acc * x + c)
    }

    /// Long division, returning `(quotient, remainder)`
    ///
    /// Panics if `divisor` is the zero polynomial.
    pub fn divmod(&self, divisor: &Polynomial) -> (Polynomial, Polynomial) {
        assert!(!divisor.is_zero(), "Polynomial division by zero");
        if self.degree() < divisor.degree() {
            return (Polynomial::new(vec![Gf256::ZERO]), self.clone());
        }

        let mut remainder = self.coefficients.clone();
        let lead = divisor.coefficients[0];
        let quotient_len = remainder.len() - divisor.coefficients.len() + 1;
        let mut quotient = vec![Gf256::ZERO; quotient_len];

        for i in 0..quotient_len {
            let coef = remainder[i] / lead;
            quotient[i] = coef;
            if coef.is_zero() {
                continue;
            }
            for (j, &d) in divisor.coefficients.iter().enumerate() {
                remainder[i + j] -= d * coef;
            }
        }

        (
            Polynomial::new(quotient),
            Polynomial::new(remainder[quotient_len..].to_vec()),
        )
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        let len = self.coefficients.len().max(rhs.coefficients.len());
        let mut out = vec![Gf256::ZERO; len];
        for (dst, &c) in out[len - self.coefficients.len()..]
            .iter_mut()
            .zip(&self.coefficients)
        {
            *dst += c;
        }
        for (dst, &c) in out[len - rhs.coefficients.len()..]
            .iter_mut()
            .zip(&rhs.coefficients)
        {
            *dst += c;
        }
        Polynomial::new(out)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        let mut out = vec![Gf256::ZERO; self.coefficients.len() + rhs.coefficients.len() - 1];
        for (i, &a) in self.coefficients.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, &b) in rhs.coefficients.iter().enumerate() {
                out[i + j] += a * b;
            }
        }
        Polynomial::new(out)
    }
}
