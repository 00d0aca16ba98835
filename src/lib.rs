//! Error-correction-code manager for file-fixity pipelines
//!
//! [`EccManager`] puts several Reed-Solomon codec variants behind one
//! encode/decode/check/verify contract. The default family (reference,
//! reference-fast, performance-compatible) produces byte-identical ecc blocks
//! over GF(2^8) with base 3; the standalone variant uses alternate field
//! parameters and is not interchangeable with the others.
//!
//! ```
//! use eccman::{EccManager, Variant};
//!
//! let manager = EccManager::new(255, 223, Variant::ReferenceStandard).unwrap();
//! let ecc = manager.encode(b"hello", None).unwrap();
//! assert_eq!(ecc.len(), 32);
//!
//! let mut damaged = b"hello".to_vec();
//! damaged[0] = b'j';
//! let decoded = manager.decode(&damaged, &ecc, None).unwrap();
//! assert_eq!(decoded.message, b"hello");
//! ```

pub mod args;
pub mod backend;
pub mod batch;
pub mod config;
pub mod error;
pub mod galois;
pub mod manager;
pub mod polynomial;
pub mod variant;

pub use args::{build_cli, parse_args};
pub use backend::{Decoded, EccCodec, EccVerify};
pub use batch::BatchProcessor;
pub use config::EccConfig;
pub use error::{EccError, Result};
pub use manager::{pad_message, EccManager, Padded, Verifier};
pub use variant::{FieldParams, Variant};
