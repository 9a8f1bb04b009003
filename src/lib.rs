//! Password-based key derivation (PBKDF2, RFC 2898).
//!
//! Stretches a secret password and a public per-credential salt through
//! repeated HMAC computation into a derived key of any requested length,
//! making brute-force and rainbow-table attacks computationally expensive.
//! The derivation is a pure, deterministic function of
//! `(password, salt, iterations, keylen, hash)`: no hidden state, no I/O,
//! and nothing shared between concurrent calls.
//!
//! ```
//! use keystretch::{Params, derive_key_hex_text};
//!
//! let key = derive_key_hex_text("what i want to hash", "the random salt", &Params::default())?;
//! assert_eq!(key, "fa7cc8a2b0a932f8e6ea42f9787e9d36e592e0c222ada6a9");
//! # Ok::<(), keystretch::KdfError>(())
//! ```
//!
//! What stays with the caller:
//!
//! 1. Compare a freshly derived key against a stored one with a
//!    constant-time byte comparison. A plain `==` leaks timing.
//! 2. Generate salts from a cryptographically secure RNG, at least
//!    8 bytes, unique per credential.
//! 3. Persist `PBKDF2-SHA1$salt:iterations$hex` (see [`CredentialRecord`])
//!    so stored keys can be migrated to stronger parameters later.
//!
//! ## References
//! - RFC 2898: PKCS #5: Password-Based Cryptography Specification v2.0
//! - RFC 2104: HMAC: Keyed-Hashing for Message Authentication
//! - RFC 6070: PBKDF2-HMAC-SHA1 test vectors

#![warn(missing_docs)]

mod encoding;
mod error;
mod hash;
mod kdf;
mod prf;
mod record;

pub use encoding::TextEncoding;
pub use error::KdfError;
pub use hash::HashAlgorithm;
pub use record::CredentialRecord;

use zeroize::Zeroize;

/// Derivation parameters.
///
/// The defaults (1000 iterations, 24-byte key, SHA-1, UTF-8) match the
/// long-standing reference behavior; real deployments should raise
/// `iterations` well beyond the default.
#[derive(Debug, Clone)]
pub struct Params {
    /// Sequential PRF applications folded into each block; the cost knob
    pub iterations: u32,
    /// Derived key length in bytes; zero is valid and yields an empty key
    pub keylen: usize,
    /// Hash underlying the HMAC PRF
    pub hash: HashAlgorithm,
    /// Conversion applied to text inputs by the `_text` entry points
    pub encoding: TextEncoding,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            iterations: 1000,
            keylen: 24,
            hash: HashAlgorithm::default(),
            encoding: TextEncoding::default(),
        }
    }
}

/// Derive `params.keylen` bytes from a password and salt.
///
/// Fails with [`KdfError::InvalidParameter`] if `params.iterations < 1`,
/// before any hashing occurs.
pub fn derive_key_bin(password: &[u8], salt: &[u8], params: &Params) -> Result<Vec<u8>, KdfError> {
    kdf::derive(password, salt, params)
}

/// Like [`derive_key_bin`], but returns the key as a lowercase hex string.
pub fn derive_key_hex(password: &[u8], salt: &[u8], params: &Params) -> Result<String, KdfError> {
    Ok(hex::encode(derive_key_bin(password, salt, params)?))
}

/// Like [`derive_key_bin`] for text inputs.
///
/// Both strings are converted with `params.encoding` before derivation;
/// the converted password copy is wiped afterwards.
pub fn derive_key_bin_text(password: &str, salt: &str, params: &Params) -> Result<Vec<u8>, KdfError> {
    let mut password = params.encoding.encode(password)?;
    let salt = params.encoding.encode(salt)?;
    let derived = kdf::derive(&password, &salt, params);
    password.zeroize();
    derived
}

/// Like [`derive_key_hex`] for text inputs.
pub fn derive_key_hex_text(password: &str, salt: &str, params: &Params) -> Result<String, KdfError> {
    Ok(hex::encode(derive_key_bin_text(password, salt, params)?))
}
