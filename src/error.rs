//! Error types for ECC manager operations

use smallvec::SmallVec;
use thiserror::Error;

/// Symbol positions reported by the decoder
pub type Positions = SmallVec<[usize; 16]>;

/// Errors that can occur while configuring or using an ECC manager
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EccError {
    /// Codeword/message sizes outside what GF(2^8) can express
    #[error("Invalid code parameters n={n}, k={k}: require 0 < k < n <= 255")]
    InvalidCodeParameters { n: usize, k: usize },

    /// Codeword length a backend cannot be built for
    #[error("Invalid codeword length n={n}: require 2 <= n <= 255")]
    InvalidCodewordLength { n: usize },

    /// Variant selector did not name a known codec strategy
    #[error("Unknown ECC variant: {0:?}")]
    UnknownVariant(String),

    /// Primitive polynomial or generator does not define GF(2^8) properly
    #[error("Invalid field parameters prim={prim:#x}, generator={generator}: {reason}")]
    InvalidFieldParams {
        prim: u16,
        generator: u8,
        reason: &'static str,
    },

    /// Message is longer than the message length it is encoded for
    #[error("Message of {len} bytes does not fit in k={k}")]
    MessageTooLong { len: usize, k: usize },

    /// ECC block length does not match n-k
    #[error("ECC block has {actual} bytes, expected {expected}")]
    EccLengthMismatch { expected: usize, actual: usize },

    /// Codeword handed to a backend is not n symbols long
    #[error("Codeword has {actual} symbols, expected {expected} (k={k})")]
    CodewordLength {
        expected: usize,
        actual: usize,
        k: usize,
    },

    /// Too many symbol errors for the code to repair
    #[error(
        "Uncorrectable codeword: more than {capacity} symbol errors (located positions: {positions:?})"
    )]
    Uncorrectable {
        capacity: usize,
        positions: Positions,
    },

    /// Reference encoder produced a codeword that fails its own check
    #[error("Encoder produced an invalid codeword for k={k}")]
    EncodeSelfCheck { k: usize },
}

impl EccError {
    /// Returns true for errors raised while building a manager
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            EccError::InvalidCodeParameters { .. }
                | EccError::InvalidCodewordLength { .. }
                | EccError::UnknownVariant(_)
                | EccError::InvalidFieldParams { .. }
        )
    }

    /// Returns true when the data itself could not be repaired
    pub fn is_uncorrectable(&self) -> bool {
        matches!(self, EccError::Uncorrectable { .. })
    }
}

/// Type alias for Result with EccError
pub type Result<T> = std::result::Result<T, EccError>;

/// Largest codeword length GF(2^8) supports
pub const MAX_CODEWORD_LEN: usize = 255;

/// Validate a `(n, k)` pair against the field size
pub fn validate_code_parameters(n: usize, k: usize) -> Result<()> {
    if k == 0 || k >= n || n > MAX_CODEWORD_LEN {
        return Err(EccError::InvalidCodeParameters { n, k });
    }
    Ok(())
}
