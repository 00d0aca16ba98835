//! ECC manager facade
//!
//! Binds one codec [`Variant`] at construction and exposes a uniform
//! encode/decode/check/verify contract over it. Messages shorter than `k` are
//! left-padded with null bytes before reaching the backend, and decode strips
//! exactly that padding back off, so binary payloads round-trip unchanged.
//!
//! Leading null bytes in a short message cannot be told apart from padding;
//! they are restored only because decode strips by the caller's message length,
//! never by inspecting content.

use crate::backend::{
    expect_message_fits, Decoded, EccCodec, EccVerify, PerformanceCodec, ReferenceCodec,
};
use crate::config::EccConfig;
use crate::error::{validate_code_parameters, EccError, Positions, Result};
use crate::variant::{FieldParams, Variant};
use log::{debug, trace};
use std::borrow::Cow;

const BASE3_DESCRIPTION: &str = "Reed-Solomon with polynomials in Galois field 256 (2^8) of base 3.";

/// Backend handles owned by each variant
#[derive(Debug)]
enum Binding {
    ReferenceStandard(ReferenceCodec),
    ReferenceFast(ReferenceCodec),
    PerformanceCompatible {
        encoder: PerformanceCodec,
        decoder: ReferenceCodec,
    },
    PerformanceStandalone(PerformanceCodec),
}

impl Binding {
    fn bind(n: usize, k: usize, variant: Variant, params: FieldParams) -> Result<Self> {
        Ok(match variant {
            Variant::ReferenceStandard => Binding::ReferenceStandard(ReferenceCodec::new(n, k)?),
            Variant::ReferenceFast => Binding::ReferenceFast(ReferenceCodec::new(n, k)?),
            Variant::PerformanceCompatible => Binding::PerformanceCompatible {
                encoder: PerformanceCodec::new(n, FieldParams::BASE3)?,
                decoder: ReferenceCodec::new(n, k)?,
            },
            Variant::PerformanceStandalone => {
                Binding::PerformanceStandalone(PerformanceCodec::new(n, params)?)
            }
        })
    }

    fn encode(&self, message: &[u8], k: usize) -> Result<Vec<u8>> {
        match self {
            Binding::ReferenceStandard(rs) => rs.encode(message, k),
            Binding::ReferenceFast(rs) => rs.encode_fast(message, k),
            Binding::PerformanceCompatible { encoder, .. } => encoder.encode(message, k),
            Binding::PerformanceStandalone(codec) => codec.encode(message, k),
        }
    }

    fn decoder(&self) -> &dyn EccCodec {
        match self {
            Binding::ReferenceStandard(rs) | Binding::ReferenceFast(rs) => rs,
            Binding::PerformanceCompatible { decoder, .. } => decoder,
            Binding::PerformanceStandalone(codec) => codec,
        }
    }

    fn checker(&self) -> &dyn EccCodec {
        match self {
            Binding::ReferenceStandard(rs) | Binding::ReferenceFast(rs) => rs,
            Binding::PerformanceCompatible { encoder, .. } => encoder,
            Binding::PerformanceStandalone(codec) => codec,
        }
    }

    fn verifier(&self) -> Option<&dyn EccVerify> {
        match self {
            Binding::ReferenceStandard(rs) | Binding::ReferenceFast(rs) => {
                Some(rs as &dyn EccVerify)
            }
            Binding::PerformanceCompatible { .. } | Binding::PerformanceStandalone(_) => None,
        }
    }
}

/// A message normalized to length `k`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Padded<'a> {
    pub message: Cow<'a, [u8]>,
    /// Number of null bytes prepended, if any
    pub padding: Option<usize>,
}

impl Padded<'_> {
    pub fn padding_len(&self) -> usize {
        self.padding.unwrap_or(0)
    }
}

/// Left-pad `message` with null bytes up to `k`; longer messages pass through
pub fn pad_message(message: &[u8], k: usize) -> Padded<'_> {
    if message.len() >= k {
        return Padded {
            message: Cow::Borrowed(message),
            padding: None,
        };
    }

    let padding = k - message.len();
    let mut padded = vec![0u8; padding];
    padded.extend_from_slice(message);
    Padded {
        message: Cow::Owned(padded),
        padding: Some(padding),
    }
}

/// Map padded-codeword positions onto the caller's message + ecc
fn unpad_positions(positions: Positions, padding: usize) -> Positions {
    positions
        .into_iter()
        .filter(|&pos| pos >= padding)
        .map(|pos| pos - padding)
        .collect()
}

/// Error-correction-code manager over one Reed-Solomon variant
///
/// Immutable after construction and `Sync`; one instance can serve many
/// threads.
#[derive(Debug)]
pub struct EccManager {
    n: usize,
    k: usize,
    variant: Variant,
    params: FieldParams,
    binding: Binding,
}

impl EccManager {
    /// Create a manager; the standalone variant uses the ADS-B UAT field
    pub fn new(n: usize, k: usize, variant: Variant) -> Result<Self> {
        Self::with_field_params(n, k, variant, FieldParams::ADSB_UAT)
    }

    /// Create a manager with explicit field parameters for the standalone variant
    ///
    /// `params` is ignored by the default-family variants, which are fixed to
    /// [`FieldParams::BASE3`].
    pub fn with_field_params(
        n: usize,
        k: usize,
        variant: Variant,
        params: FieldParams,
    ) -> Result<Self> {
        validate_code_parameters(n, k)?;
        let params = if variant.is_default_family() {
            FieldParams::BASE3
        } else {
            params
        };
        let binding = Binding::bind(n, k, variant, params)?;
        debug!("ECC manager bound: n={}, k={}, variant={}", n, k, variant);

        Ok(Self {
            n,
            k,
            variant,
            params,
            binding,
        })
    }

    pub fn from_config(config: &EccConfig) -> Result<Self> {
        Self::with_field_params(config.n, config.k, config.variant, config.field_params)
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn field_params(&self) -> FieldParams {
        self.params
    }

    /// Resolve and validate a per-call `k`
    fn resolve_k(&self, k: Option<usize>) -> Result<usize> {
        let k = k.unwrap_or(self.k);
        validate_code_parameters(self.n, k)?;
        Ok(k)
    }

    /// Pad `message` with leading null bytes up to `k`
    pub fn pad<'a>(&self, message: &'a [u8], k: Option<usize>) -> Padded<'a> {
        pad_message(message, k.unwrap_or(self.k))
    }

    /// Pad and concatenate message + ecc into a full codeword
    fn codeword(&self, message: &[u8], ecc: &[u8], k: usize) -> Result<(Vec<u8>, usize)> {
        expect_message_fits(message, k)?;
        if ecc.len() != self.n - k {
            return Err(EccError::EccLengthMismatch {
                expected: self.n - k,
                actual: ecc.len(),
            });
        }

        let padded = pad_message(message, k);
        let padding = padded.padding_len();
        let mut codeword = padded.message.into_owned();
        codeword.extend_from_slice(ecc);
        Ok((codeword, padding))
    }

    /// Compute the `n-k` ecc symbols for `message`
    pub fn encode(&self, message: &[u8], k: Option<usize>) -> Result<Vec<u8>> {
        let k = self.resolve_k(k)?;
        expect_message_fits(message, k)?;
        let padded = pad_message(message, k);

        let mut codeword = self.binding.encode(&padded.message, k)?;
        trace!("Encoded {} message bytes with k={}", message.len(), k);
        Ok(codeword.split_off(k))
    }

    /// Repair `message` and `ecc`, returning both at their original lengths
    pub fn decode(&self, message: &[u8], ecc: &[u8], k: Option<usize>) -> Result<Decoded> {
        let k = self.resolve_k(k)?;
        let (codeword, padding) = self.codeword(message, ecc, k)?;

        let mut decoded = self
            .binding
            .decoder()
            .decode(&codeword, k)
            .map_err(|err| {
                debug!("Decode failed for variant {}: {}", self.variant, err);
                match err {
                    EccError::Uncorrectable {
                        capacity,
                        positions,
                    } => EccError::Uncorrectable {
                        capacity,
                        positions: unpad_positions(positions, padding),
                    },
                    other => other,
                }
            })?;

        if padding > 0 {
            // Padding is all zeros, so a repair inside it is a miscorrection
            if decoded.corrected.iter().any(|&pos| pos < padding) {
                debug!(
                    "Decoder repaired padding symbols {:?}, rejecting",
                    decoded.corrected.as_slice()
                );
                return Err(EccError::Uncorrectable {
                    capacity: (self.n - k) / 2,
                    positions: unpad_positions(decoded.corrected, padding),
                });
            }
            decoded.message.drain(..padding);
            decoded.corrected = unpad_positions(decoded.corrected, padding);
        }
        Ok(decoded)
    }

    /// True when message + ecc has no detectable error
    pub fn check(&self, message: &[u8], ecc: &[u8], k: Option<usize>) -> Result<bool> {
        let k = self.resolve_k(k)?;
        let (codeword, _) = self.codeword(message, ecc, k)?;
        self.binding.checker().check(&codeword, k)
    }

    /// Verification capability, available only on the reference variants
    pub fn verifier(&self) -> Option<Verifier<'_>> {
        self.binding.verifier().map(|backend| Verifier {
            manager: self,
            backend,
        })
    }

    /// Human-readable field parameters, persisted alongside ecc blocks
    pub fn description(&self) -> Cow<'static, str> {
        if self.variant.is_default_family() {
            return Cow::Borrowed(BASE3_DESCRIPTION);
        }

        let FieldParams {
            prim,
            generator,
            fcr,
        } = self.params;
        if self.params == FieldParams::ADSB_UAT {
            Cow::Owned(format!(
                "Reed-Solomon with polynomials in Galois field 256 (2^8) under US FAA ADSB UAT RS FEC standard with prim={} and fcr={}.",
                prim, fcr
            ))
        } else {
            Cow::Owned(format!(
                "Reed-Solomon with polynomials in Galois field 256 (2^8) with prim={}, generator={} and fcr={}.",
                prim, generator, fcr
            ))
        }
    }
}

/// Handle on a manager whose backend can verify codewords
#[derive(Clone, Copy)]
pub struct Verifier<'a> {
    manager: &'a EccManager,
    backend: &'a dyn EccVerify,
}

impl Verifier<'_> {
    /// True when message + ecc is a valid Reed-Solomon codeword
    pub fn verify(&self, message: &[u8], ecc: &[u8], k: Option<usize>) -> Result<bool> {
        let k = self.manager.resolve_k(k)?;
        let (codeword, _) = self.manager.codeword(message, ecc, k)?;
        self.backend.verify(&codeword, k)
    }
}
