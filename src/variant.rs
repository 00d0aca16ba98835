//! Codec variant selection

use crate::error::{EccError, Result};
use crate::galois::{BASE3_GENERATOR, BASE3_PRIMITIVE};
use std::fmt;
use std::str::FromStr;

/// Reed-Solomon codec strategy bound by an [`EccManager`](crate::EccManager)
///
/// The first three variants share the base-3 field and produce byte-identical
/// ECC blocks. `PerformanceStandalone` uses alternate field parameters and its
/// codewords must never be mixed with the others; nothing detects such a mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// Reference backend, self-checking encoder
    #[default]
    ReferenceStandard,
    /// Reference backend, encoder without self-check
    ReferenceFast,
    /// Table-driven encoder on the base-3 field, reference decoder
    PerformanceCompatible,
    /// Table-driven codec on alternate field parameters
    PerformanceStandalone,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::ReferenceStandard,
        Variant::ReferenceFast,
        Variant::PerformanceCompatible,
        Variant::PerformanceStandalone,
    ];

    /// Map the numeric `--ecc-algo` selector (1-4)
    pub fn from_algo(algo: u8) -> Result<Self> {
        match algo {
            1 => Ok(Variant::ReferenceStandard),
            2 => Ok(Variant::ReferenceFast),
            3 => Ok(Variant::PerformanceCompatible),
            4 => Ok(Variant::PerformanceStandalone),
            other => Err(EccError::UnknownVariant(other.to_string())),
        }
    }

    pub fn algo(&self) -> u8 {
        match self {
            Variant::ReferenceStandard => 1,
            Variant::ReferenceFast => 2,
            Variant::PerformanceCompatible => 3,
            Variant::PerformanceStandalone => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Variant::ReferenceStandard => "reference",
            Variant::ReferenceFast => "reference-fast",
            Variant::PerformanceCompatible => "performance-compatible",
            Variant::PerformanceStandalone => "performance-standalone",
        }
    }

    /// True for the variants sharing the base-3 field
    pub fn is_default_family(&self) -> bool {
        !matches!(self, Variant::PerformanceStandalone)
    }

    /// Whether ECC blocks written by `self` can be decoded by `other`
    ///
    /// Standalone variants are only compared by family here; callers must also
    /// match their [`FieldParams`].
    pub fn is_compatible_with(&self, other: Variant) -> bool {
        self.is_default_family() == other.is_default_family()
    }

    /// Only the reference backend exposes `verify`
    pub fn supports_verify(&self) -> bool {
        matches!(self, Variant::ReferenceStandard | Variant::ReferenceFast)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Variant {
    type Err = EccError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(algo) = trimmed.parse::<u8>() {
            return Variant::from_algo(algo);
        }
        Variant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| EccError::UnknownVariant(s.to_string()))
    }
}

/// Field parameters for the table-driven backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldParams {
    /// Primitive polynomial, including the x⁸ term
    pub prim: u16,
    /// Field element whose powers enumerate the nonzero elements
    pub generator: u8,
    /// First consecutive root of the generator polynomial
    pub fcr: u8,
}

impl FieldParams {
    /// Default field shared by the reference-compatible variants
    pub const BASE3: FieldParams = FieldParams {
        prim: BASE3_PRIMITIVE,
        generator: BASE3_GENERATOR,
        fcr: 1,
    };

    /// US FAA ADS-B UAT RS FEC parameters
    pub const ADSB_UAT: FieldParams = FieldParams {
        prim: 0x187,
        generator: 2,
        fcr: 120,
    };

    pub const fn new(prim: u16, generator: u8, fcr: u8) -> Self {
        Self {
            prim,
            generator,
            fcr,
        }
    }
}

impl Default for FieldParams {
    fn default() -> Self {
        FieldParams::ADSB_UAT
    }
}
