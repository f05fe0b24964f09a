//! SHA-1 digest utilities for package integrity verification.
//!
//! The wire format stores a 20-byte binary SHA-1 digest of the canonical
//! decompressed payload. SHA-1 here is a tamper-evidence mechanism for the
//! fixed wire layout, not a security boundary against adversarial senders;
//! untrusted repositories would additionally need cryptographic signatures.

use sha1::{Digest, Sha1};

/// Length of the binary digest stored in the package header.
pub const DIGEST_LEN: usize = 20;

/// Computes the SHA-1 digest of the given bytes.
///
/// # Examples
///
/// ```
/// use plugpack_format::digest::{DIGEST_LEN, sha1_digest};
///
/// let digest = sha1_digest(b"payload");
/// assert_eq!(digest.len(), DIGEST_LEN);
/// assert_eq!(digest, sha1_digest(b"payload"));
/// ```
#[must_use]
pub fn sha1_digest(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha1::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compares two byte slices in constant time.
///
/// Always processes the full length of both slices, accumulating
/// differences with bitwise OR instead of short-circuiting, so an attacker
/// cannot deduce a correct digest byte-by-byte from comparison timing.
///
/// # Examples
///
/// ```
/// use plugpack_format::constant_time_eq;
///
/// assert!(constant_time_eq(b"abc", b"abc"));
/// assert!(!constant_time_eq(b"abc", b"abd"));
/// assert!(!constant_time_eq(b"abc", b"abcdef"));
/// ```
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let len_match = a.len() == b.len();
    let max_len = a.len().max(b.len());

    let mut diff = 0u8;
    for i in 0..max_len {
        // Out-of-range reads fall back to a neutral value so the loop
        // length never depends on where the slices differ.
        let byte_a = a.get(i).copied().unwrap_or(0);
        let byte_b = b.get(i).copied().unwrap_or(0);
        diff |= byte_a ^ byte_b;
    }

    len_match && diff == 0
}
