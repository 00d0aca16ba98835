//! Galois Field GF(2^8) arithmetic for Reed-Solomon ECC
//!
//! Tables are built for an arbitrary primitive polynomial and generator, so the
//! same code serves the default base-3 field (0x11B, generator 3) and alternate
//! standards such as the FAA ADS-B UAT field (0x187, generator 2).
//!
//! [`Gf256`] is an element of the default base-3 field with operator overloads,
//! backed by a process-wide table built once on first use.

use crate::error::{EccError, Result};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};
use std::sync::OnceLock;

/// Number of nonzero field elements (order of the multiplicative group)
pub const FIELD_LIMIT: usize = 255;

/// Default field: x⁸ + x⁴ + x³ + x + 1
pub const BASE3_PRIMITIVE: u16 = 0x11B;

/// 3 generates the whole multiplicative group of the 0x11B field
pub const BASE3_GENERATOR: u8 = 3;

/// Carry-less multiplication reduced by `prim`, no lookup tables
pub fn mul_no_lut(a: u8, b: u8, prim: u16) -> u8 {
    let mut a = a as u16;
    let mut b = b;
    let mut result = 0u16;

    while b > 0 {
        if b & 1 != 0 {
            result ^= a;
        }
        b >>= 1;
        a <<= 1;
        if a & 0x100 != 0 {
            a ^= prim;
        }
    }

    result as u8
}

/// Precomputed log/antilog tables for GF(2^8)
#[derive(Clone)]
pub struct GaloisField {
    prim: u16,
    generator: u8,
    log: [u8; 256],
    exp: [u8; 512], // 2x size to avoid modulo in mul
}

impl GaloisField {
    /// Build tables for `prim`, rejecting parameters that do not span the field
    pub fn new(prim: u16, generator: u8) -> Result<Self> {
        if !(0x100..=0x1FF).contains(&prim) {
            return Err(EccError::InvalidFieldParams {
                prim,
                generator,
                reason: "primitive polynomial must have degree 8",
            });
        }
        if generator < 2 {
            return Err(EccError::InvalidFieldParams {
                prim,
                generator,
                reason: "generator must be greater than 1",
            });
        }

        let (field, order) = Self::build(prim, generator);
        if order != FIELD_LIMIT {
            return Err(EccError::InvalidFieldParams {
                prim,
                generator,
                reason: "generator does not span the multiplicative group",
            });
        }
        Ok(field)
    }

    /// Fill the tables, returning the multiplicative order of `generator`
    fn build(prim: u16, generator: u8) -> (Self, usize) {
        let mut field = GaloisField {
            prim,
            generator,
            log: [0; 256],
            exp: [0; 512],
        };

        let mut x = 1u8;
        let mut order = FIELD_LIMIT;
        for i in 0..FIELD_LIMIT {
            if i > 0 && (x == 1 || x == 0) {
                order = i;
                break;
            }
            field.exp[i] = x;
            field.log[x as usize] = i as u8;
            x = mul_no_lut(x, generator, prim);
        }
        if order == FIELD_LIMIT && x != 1 {
            order = 0;
        }

        for i in FIELD_LIMIT..field.exp.len() {
            field.exp[i] = field.exp[i - FIELD_LIMIT];
        }

        (field, order)
    }

    #[inline]
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp[self.log[a as usize] as usize + self.log[b as usize] as usize]
    }

    #[inline]
    pub fn div(&self, a: u8, b: u8) -> u8 {
        if b == 0 {
            panic!("Division by zero in Galois field");
        }
        if a == 0 {
            return 0;
        }
        self.exp[self.log[a as usize] as usize + FIELD_LIMIT - self.log[b as usize] as usize]
    }

    /// Raise an element to a (possibly negative) power
    #[inline]
    pub fn pow(&self, base: u8, exponent: i64) -> u8 {
        if base == 0 {
            return if exponent == 0 { 1 } else { 0 };
        }
        let log_result = (self.log[base as usize] as i64 * exponent).rem_euclid(FIELD_LIMIT as i64);
        self.exp[log_result as usize]
    }

    /// Generator raised to `power`
    #[inline]
    pub fn alpha_pow(&self, power: i64) -> u8 {
        self.exp[power.rem_euclid(FIELD_LIMIT as i64) as usize]
    }

    #[inline]
    pub fn inverse(&self, a: u8) -> u8 {
        if a == 0 {
            panic!("Cannot invert zero in Galois field");
        }
        self.exp[FIELD_LIMIT - self.log[a as usize] as usize]
    }

    /// Logarithm to the field generator; undefined (returns 0) for zero
    #[inline]
    pub fn log(&self, a: u8) -> u8 {
        self.log[a as usize]
    }
}

impl std::fmt::Debug for GaloisField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GaloisField")
            .field("prim", &format_args!("{:#x}", self.prim))
            .field("generator", &self.generator)
            .finish()
    }
}

/// Global base-3 field shared by the reference backend
static BASE3_FIELD: OnceLock<GaloisField> = OnceLock::new();

/// Get the global base-3 Galois field instance
pub fn base3_field() -> &'static GaloisField {
    BASE3_FIELD.get_or_init(|| GaloisField::build(BASE3_PRIMITIVE, BASE3_GENERATOR).0)
}

/// Element of the base-3 field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Gf256 {
    value: u8,
}

impl Gf256 {
    pub const ZERO: Gf256 = Gf256 { value: 0 };
    pub const ONE: Gf256 = Gf256 { value: 1 };

    pub const fn new(value: u8) -> Self {
        Self { value }
    }

    /// Generator (3) raised to `power`
    pub fn alpha(power: i64) -> Self {
        Self::new(base3_field().alpha_pow(power))
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    pub fn pow(&self, exponent: i64) -> Self {
        Self::new(base3_field().pow(self.value, exponent))
    }

    pub fn inverse(&self) -> Self {
        Self::new(base3_field().inverse(self.value))
    }
}

// Addition (XOR in Galois fields)
impl Add for Gf256 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.value ^ rhs.value)
    }
}

impl AddAssign for Gf256 {
    fn add_assign(&mut self, rhs: Self) {
        self.value ^= rhs.value;
    }
}

// Subtraction (same as addition in GF(2^n))
impl Sub for Gf256 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.value ^ rhs.value)
    }
}

impl SubAssign for Gf256 {
    fn sub_assign(&mut self, rhs: Self) {
        self.value ^= rhs.value;
    }
}

impl Mul for Gf256 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(base3_field().mul(self.value, rhs.value))
    }
}

impl MulAssign for Gf256 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Div for Gf256 {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self::new(base3_field().div(self.value, rhs.value))
    }
}

impl DivAssign for Gf256 {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl From<u8> for Gf256 {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Gf256> for u8 {
    fn from(val: Gf256) -> Self {
        val.value
    }
}

impl std::fmt::Display for Gf256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
