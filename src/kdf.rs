//! PBKDF2 block generation and derivation loop.
//!
//! Implements the F function and the outer block loop of RFC 2898 §5.2.
//! Each output block is the XOR fold of `iterations` chained PRF outputs,
//! seeded with `salt || BE32(index)`; blocks are produced in increasing
//! index order starting at 1 and written straight into the output buffer,
//! so truncation of the final partial block falls out of the chunking.
//!
//! ## References
//! - RFC 2898: PKCS #5: Password-Based Cryptography Specification v2.0
//! - RFC 6070: PBKDF2 test vectors

use digest::Digest;
use digest::crypto_common::BlockSizeUser;
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use zeroize::Zeroize;

use crate::error::KdfError;
use crate::hash::HashAlgorithm;
use crate::prf::KeyedHash;
use crate::Params;

/// Block indices are 32-bit, so RFC 2898 caps the derived key at
/// (2^32 - 1) blocks
const MAX_BLOCKS: u64 = u32::MAX as u64;

/// Validated derivation entry point shared by the public operations.
pub(crate) fn derive(password: &[u8], salt: &[u8], params: &Params) -> Result<Vec<u8>, KdfError> {
    if params.iterations < 1 {
        return Err(KdfError::InvalidParameter("iterations must be >= 1"));
    }
    let digest_size = params.hash.digest_size();
    if params.keylen.div_ceil(digest_size) as u64 > MAX_BLOCKS {
        return Err(KdfError::InvalidParameter("requested key length needs more than 2^32 - 1 blocks"));
    }

    tracing::trace!(
        algorithm = %params.hash,
        iterations = params.iterations,
        keylen = params.keylen,
        "deriving key"
    );

    let mut out = vec![0u8; params.keylen];
    match params.hash {
        HashAlgorithm::Sha1 => fill::<Sha1>(password, salt, params.iterations, &mut out),
        HashAlgorithm::Sha256 => fill::<Sha256>(password, salt, params.iterations, &mut out),
        HashAlgorithm::Sha512 => fill::<Sha512>(password, salt, params.iterations, &mut out),
    }
    Ok(out)
}

/// Derivation loop over one monomorphized hash: key the PRF once, then
/// generate one digest-sized block per output chunk. A zero-length output
/// never touches the block generator.
fn fill<D>(password: &[u8], salt: &[u8], iterations: u32, out: &mut [u8])
where
    D: Digest + BlockSizeUser + Clone,
{
    let prf = KeyedHash::<D>::new(password);
    for (i, chunk) in out.chunks_mut(<D as Digest>::output_size()).enumerate() {
        generate_block(&prf, salt, i as u32 + 1, iterations, chunk);
    }
}

/// One PBKDF2 block (the F function), XOR-folded into `chunk`.
fn generate_block<D>(prf: &KeyedHash<D>, salt: &[u8], index: u32, iterations: u32, chunk: &mut [u8])
where
    D: Digest + BlockSizeUser + Clone,
{
    // The public boundary validates before this hot loop is entered
    debug_assert!(iterations >= 1, "iterations must be >= 1");
    debug_assert!(index >= 1, "block indices are 1-based");

    for v in chunk.iter_mut() {
        *v = 0;
    }

    // U_1 = PRF(password, salt || index)
    let mut u = {
        let mut mac = prf.clone();
        mac.update(salt);
        mac.update(&index.to_be_bytes());
        let u = mac.finalize();
        xor(chunk, &u);
        u
    };

    // U_j = PRF(password, U_{j-1})
    for _ in 1..iterations {
        let mut mac = prf.clone();
        mac.update(&u);
        u = mac.finalize();
        xor(chunk, &u);
    }

    u.as_mut_slice().zeroize();
}

#[inline(always)]
fn xor(chunk: &mut [u8], u: &[u8]) {
    debug_assert!(u.len() >= chunk.len(), "fold source shorter than target block");
    chunk.iter_mut().zip(u.iter()).for_each(|(a, b)| *a ^= b);
}
