//! Persisted credential layout: `PBKDF2-SHA1$salt:iterations$hex`.
//!
//! Storing the algorithm and cost next to the derived key lets a record
//! identify which parameters produced it, so entries can be migrated to a
//! stronger algorithm or iteration count later without a flag day.
//!
//! Verification stays with the caller: re-derive with [`Self::params`] and
//! compare against [`Self::hex_key`] using a constant-time comparison.

use std::fmt;
use std::str::FromStr;

use crate::error::KdfError;
use crate::hash::HashAlgorithm;
use crate::Params;

/// A derived key bundled with the parameters that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    /// Hash underlying the PRF when the key was derived
    pub hash: HashAlgorithm,
    /// Salt text, stored verbatim
    pub salt: String,
    /// Iteration count used for the derivation
    pub iterations: u32,
    /// Lowercase hex encoding of the derived key
    pub hex_key: String,
}

impl CredentialRecord {
    /// Derive a key from `password` and package it with its parameters.
    ///
    /// The salt text is converted with `params.encoding`, same as the
    /// `_text` derivation entry points, and stored verbatim.
    pub fn create(password: &[u8], salt: &str, params: &Params) -> Result<Self, KdfError> {
        let salt_bytes = params.encoding.encode(salt)?;
        let hex_key = crate::derive_key_hex(password, &salt_bytes, params)?;
        Ok(CredentialRecord {
            hash: params.hash,
            salt: salt.to_string(),
            iterations: parse_iterations_guard(params.iterations)?,
            hex_key,
        })
    }

    /// Parameters equivalent to the ones stored in this record, for
    /// re-deriving a candidate key during verification.
    pub fn params(&self) -> Params {
        Params {
            iterations: self.iterations,
            keylen: self.hex_key.len() / 2,
            hash: self.hash,
            ..Params::default()
        }
    }
}

// `derive` has already rejected iterations < 1 by the time a record is
// built, but records can also be constructed directly.
fn parse_iterations_guard(iterations: u32) -> Result<u32, KdfError> {
    if iterations < 1 {
        return Err(KdfError::InvalidParameter("iterations must be >= 1"));
    }
    Ok(iterations)
}

impl fmt::Display for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}${}:{}${}",
            self.hash.record_label(),
            self.salt,
            self.iterations,
            self.hex_key
        )
    }
}

impl FromStr for CredentialRecord {
    type Err = KdfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || KdfError::InvalidParameter("malformed credential record");

        let (label, rest) = s.split_once('$').ok_or_else(malformed)?;
        // Salts may contain '$' or ':', so split from the right
        let (middle, hex_key) = rest.rsplit_once('$').ok_or_else(malformed)?;
        let (salt, iterations) = middle.rsplit_once(':').ok_or_else(malformed)?;

        let hash = HashAlgorithm::from_record_label(label)?;
        let iterations = parse_iterations_guard(iterations.parse().map_err(|_| malformed())?)?;

        Ok(CredentialRecord {
            hash,
            salt: salt.to_string(),
            iterations,
            hex_key: hex_key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_format() {
        let params = Params { iterations: 10000, ..Params::default() };
        let record = CredentialRecord::create(b"password", "thesalt", &params).unwrap();

        let text = record.to_string();
        assert!(text.starts_with("PBKDF2-SHA1$thesalt:10000$"));
        assert_eq!(record.hex_key.len(), params.keylen * 2);
    }

    #[test]
    fn test_parse_round_trip() {
        let record = CredentialRecord {
            hash: HashAlgorithm::Sha256,
            salt: "the:odd$salt".to_string(),
            iterations: 10000,
            hex_key: "deadbeef".to_string(),
        };
        let parsed: CredentialRecord = record.to_string().parse().unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_params_reconstruct_the_derivation() {
        let params = Params { iterations: 321, keylen: 17, ..Params::default() };
        let record = CredentialRecord::create(b"hunter2", "pepper", &params).unwrap();

        let candidate = crate::derive_key_hex_text("hunter2", "pepper", &record.params()).unwrap();
        assert_eq!(candidate, record.hex_key);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "PBKDF2-SHA1", "PBKDF2-SHA1$salt$hex", "PBKDF2-SHA1$salt:zero$hex", "PBKDF2-SHA1$salt:0$hex"] {
            assert!(bad.parse::<CredentialRecord>().is_err(), "accepted {bad:?}");
        }
        assert_eq!(
            "PBKDF2-MD5$salt:1000$aa".parse::<CredentialRecord>(),
            Err(KdfError::UnsupportedHashAlgorithm("PBKDF2-MD5".to_string()))
        );
    }
}
