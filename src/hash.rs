//! Hash algorithm selection for the HMAC pseudorandom function.

use std::fmt;
use std::str::FromStr;

use digest::Digest;
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::error::KdfError;

/// Hash function underlying the HMAC PRF.
///
/// SHA-1 is the default, matching the RFC 6070 reference vectors and the
/// `PBKDF2-SHA1` records most deployments already hold. New deployments
/// should prefer SHA-256 or SHA-512 and a higher iteration count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    /// SHA-1, 20-byte digests
    #[default]
    Sha1,
    /// SHA-256, 32-byte digests
    Sha256,
    /// SHA-512, 64-byte digests
    Sha512,
}

impl HashAlgorithm {
    /// Digest size in bytes; one derived block is exactly this long
    pub fn digest_size(self) -> usize {
        match self {
            HashAlgorithm::Sha1 => Sha1::output_size(),
            HashAlgorithm::Sha256 => Sha256::output_size(),
            HashAlgorithm::Sha512 => Sha512::output_size(),
        }
    }

    /// Algorithm label used in persisted credential records
    pub fn record_label(self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "PBKDF2-SHA1",
            HashAlgorithm::Sha256 => "PBKDF2-SHA256",
            HashAlgorithm::Sha512 => "PBKDF2-SHA512",
        }
    }

    pub(crate) fn from_record_label(label: &str) -> Result<Self, KdfError> {
        match label {
            "PBKDF2-SHA1" => Ok(HashAlgorithm::Sha1),
            "PBKDF2-SHA256" => Ok(HashAlgorithm::Sha256),
            "PBKDF2-SHA512" => Ok(HashAlgorithm::Sha512),
            other => Err(KdfError::UnsupportedHashAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
        })
    }
}

impl FromStr for HashAlgorithm {
    type Err = KdfError;

    /// Resolve a hash identifier such as `"sha1"` or `"SHA-256"`.
    ///
    /// Unknown identifiers fail with [`KdfError::UnsupportedHashAlgorithm`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(HashAlgorithm::Sha1),
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            "sha512" | "sha-512" => Ok(HashAlgorithm::Sha512),
            _ => Err(KdfError::UnsupportedHashAlgorithm(s.to_string())),
        }
    }
}
