//! Reed-Solomon codec backends
//!
//! Two capability interfaces describe what a backend can do:
//! - [`EccCodec`]: encode, correcting decode and syndrome check (every backend)
//! - [`EccVerify`]: codeword verification (reference backend only)
//!
//! Backends work on full codewords (message followed by ecc) of a fixed length
//! `n`; a per-call `k` selects how many of those symbols are message.

pub mod performance;
pub mod reference;

pub use performance::PerformanceCodec;
pub use reference::ReferenceCodec;

use crate::error::{validate_code_parameters, EccError, Positions, Result};

/// Output of a correcting decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Repaired message symbols
    pub message: Vec<u8>,
    /// Repaired ecc symbols
    pub ecc: Vec<u8>,
    /// Codeword positions that were corrected
    pub corrected: Positions,
}

impl Decoded {
    /// Split a repaired codeword at `k`
    pub(crate) fn split(mut codeword: Vec<u8>, k: usize, corrected: Positions) -> Self {
        let ecc = codeword.split_off(k);
        Self {
            message: codeword,
            ecc,
            corrected,
        }
    }

    /// True when the codeword needed no repair
    pub fn was_intact(&self) -> bool {
        self.corrected.is_empty()
    }
}

/// Mandatory backend capability
pub trait EccCodec: Send + Sync {
    /// Codeword length this backend was built for
    fn n(&self) -> usize;

    /// Encode a message of at most `k` symbols, returning message + ecc
    fn encode(&self, message: &[u8], k: usize) -> Result<Vec<u8>>;

    /// Correct a full codeword, without stripping any symbols
    fn decode(&self, codeword: &[u8], k: usize) -> Result<Decoded>;

    /// True when every syndrome of the codeword is zero
    fn check(&self, codeword: &[u8], k: usize) -> Result<bool>;
}

/// Optional backend capability
pub trait EccVerify: EccCodec {
    /// True when the codeword is a multiple of the generator polynomial
    fn verify(&self, codeword: &[u8], k: usize) -> Result<bool>;
}

/// Number of ecc symbols for `(n, k)`
pub(crate) fn ecc_len(n: usize, k: usize) -> Result<usize> {
    validate_code_parameters(n, k)?;
    Ok(n - k)
}

pub(crate) fn expect_codeword_len(codeword: &[u8], n: usize, k: usize) -> Result<()> {
    if codeword.len() != n {
        return Err(EccError::CodewordLength {
            expected: n,
            actual: codeword.len(),
            k,
        });
    }
    Ok(())
}

pub(crate) fn expect_message_fits(message: &[u8], k: usize) -> Result<()> {
    if message.len() > k {
        return Err(EccError::MessageTooLong {
            len: message.len(),
            k,
        });
    }
    Ok(())
}
