//! Keyed pseudorandom function built on HMAC.
//!
//! This module implements HMAC as specified in RFC 2104, specialized for
//! use as the PBKDF2 PRF: the key (the password) is fixed once per
//! derivation, then evaluated against many short messages. The inner and
//! outer padded-key digest states are computed a single time and cloned per
//! evaluation, so the per-message cost is two compression passes rather
//! than a full key schedule.
//!
//! ## References
//! - RFC 2104: HMAC: Keyed-Hashing for Message Authentication
//! - RFC 2898: PKCS #5: Password-Based Cryptography Specification v2.0

use digest::crypto_common::BlockSizeUser;
use digest::{Digest, Output};
use zeroize::Zeroize;

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// HMAC core with pre-computed inner and outer key states.
///
/// Keyed once with the password; every evaluation clones this state instead
/// of re-deriving the key material. Two evaluations with the same key and
/// message produce identical digests.
#[derive(Clone)]
pub(crate) struct KeyedHash<D: Digest + BlockSizeUser + Clone> {
    inner: D,
    outer: D,
}

impl<D: Digest + BlockSizeUser + Clone> KeyedHash<D> {
    /// Key the PRF. Keys longer than the hash block size are hashed down
    /// first, per RFC 2104.
    pub(crate) fn new(key: &[u8]) -> Self {
        let block_size = D::block_size();

        let mut key_block = vec![0u8; block_size];
        if key.len() <= block_size {
            key_block[..key.len()].copy_from_slice(key);
        } else {
            let key_digest = D::digest(key);
            key_block[..key_digest.len()].copy_from_slice(&key_digest);
        }

        let mut pad = vec![0u8; block_size];

        for (p, k) in pad.iter_mut().zip(&key_block) {
            *p = k ^ IPAD;
        }
        let mut inner = D::new();
        inner.update(&pad);

        for (p, k) in pad.iter_mut().zip(&key_block) {
            *p = k ^ OPAD;
        }
        let mut outer = D::new();
        outer.update(&pad);

        pad.zeroize();
        key_block.zeroize();

        Self { inner, outer }
    }

    /// Feed message bytes into this evaluation
    pub(crate) fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finish the evaluation: `H(key ^ opad || H(key ^ ipad || message))`
    pub(crate) fn finalize(self) -> Output<D> {
        let inner_digest = self.inner.finalize();
        let mut outer = self.outer;
        outer.update(&inner_digest);
        outer.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha1::Sha1;
    use sha2::{Sha256, Sha512};

    fn hmac_hex<D: Digest + BlockSizeUser + Clone>(key: &[u8], message: &[u8]) -> String {
        let mut mac = KeyedHash::<D>::new(key);
        mac.update(message);
        hex::encode(mac.finalize())
    }

    #[test]
    fn test_rfc2202_sha1_vector() {
        // RFC 2202 test case 1
        assert_eq!(
            hmac_hex::<Sha1>(&[0x0b; 20], b"Hi There"),
            "b617318655057264e28bc0b6fb378c8ef146be00"
        );
    }

    #[test]
    fn test_rfc4231_sha2_vectors() {
        // RFC 4231 test case 1
        assert_eq!(
            hmac_hex::<Sha256>(&[0x0b; 20], b"Hi There"),
            "b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7"
        );
        assert_eq!(
            hmac_hex::<Sha512>(&[0x0b; 20], b"Hi There"),
            "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cde\
             daa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"
        );
    }

    #[test]
    fn test_long_key_is_hashed_down() {
        // RFC 2202 test case 6: 80-byte key, longer than the SHA-1 block
        assert_eq!(
            hmac_hex::<Sha1>(
                &[0xaa; 80],
                b"Test Using Larger Than Block-Size Key - Hash Key First"
            ),
            "aa4ae5e15272d00e95705637ce8a3b55ed402112"
        );
    }

    #[test]
    fn test_cloned_evaluations_are_independent() {
        let keyed = KeyedHash::<Sha1>::new(b"key");

        let mut first = keyed.clone();
        first.update(b"message");
        let mut second = keyed.clone();
        second.update(b"message");

        assert_eq!(
            first.finalize(),
            second.finalize(),
            "same key and message must produce identical digests"
        );

        let mut third = keyed.clone();
        third.update(b"other message");
        let mut baseline = keyed;
        baseline.update(b"message");
        assert_ne!(third.finalize(), baseline.finalize());
    }
}
