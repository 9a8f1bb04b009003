//! Error taxonomy for key derivation.
//!
//! Derivation is pure arithmetic over bytes, so there are no transient or
//! environmental failure modes: every error here is immediate, synchronous
//! and fatal to the call. No failure leaves a usable partial key.

use thiserror::Error;

use crate::encoding::TextEncoding;

/// Errors produced by key derivation and its input conversions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KdfError {
    /// A derivation parameter is out of range.
    ///
    /// Detected before any hashing occurs.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// The requested hash identifier names an algorithm this crate does
    /// not provide.
    #[error("unsupported hash algorithm: {0}")]
    UnsupportedHashAlgorithm(String),

    /// Text input cannot be represented in the requested encoding.
    ///
    /// Detected before the PRF is constructed.
    #[error("text input not representable as {encoding}")]
    EncodingError {
        /// The encoding that rejected the input
        encoding: TextEncoding,
    },
}
