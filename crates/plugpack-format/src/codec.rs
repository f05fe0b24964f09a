//! The wire-format transcoder.
//!
//! Encoding validates the package, serializes it into the deterministic
//! canonical JSON payload, digests the canonical bytes with SHA-1, then
//! compresses them with zlib and prepends the fixed header. Decoding runs
//! the exact inverse with the checks ordered cheapest-first: magic marker,
//! bounded decompression, digest verification, structural decode, schema
//! validation.
//!
//! The digest always covers the *uncompressed* canonical bytes
//! (digest-then-compress on encode, decompress-then-verify on decode), so
//! compression-library differences can never affect integrity checking.

use crate::digest::{DIGEST_LEN, constant_time_eq, sha1_digest};
use crate::error::{PackageError, Result};
use crate::package::Package;
use crate::validate::validate;
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Magic marker prefixing every package blob.
pub const MAGIC: &[u8; 14] = b"R7RPLGPACKV001";

/// Version tag of the canonical payload record.
pub const FORMAT_VERSION: u32 = 1;

/// Total header length: magic marker plus binary digest.
pub const HEADER_LEN: usize = MAGIC.len() + DIGEST_LEN;

/// Default bound on the decompressed payload size (64 MiB).
///
/// The compressed payload is attacker-controllable and zlib ratios can
/// exceed 1000:1, so decoding without a bound would let a tiny blob
/// exhaust memory. [`Package::decode_with_limit`] accepts a custom bound.
pub const DEFAULT_MAX_PAYLOAD: u64 = 64 * 1024 * 1024;

/// Canonical payload record: a version tag wrapping the package fields.
///
/// Decoding into this statically-shaped record (rather than reconstructing
/// live objects from the wire) is what turns structural garbage into a
/// clean decode error.
#[derive(Serialize)]
struct EnvelopeRef<'a> {
    format_version: u32,
    package: &'a Package,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    format_version: u32,
    package: Package,
}

impl Package {
    /// Encodes the package into its binary wire form.
    ///
    /// The package is validated first, so garbage is rejected before it is
    /// shipped. Identical packages yield identical bytes: the canonical
    /// payload serializes struct fields in declaration order and tree
    /// entries in name order.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::Schema`] if the package fails validation,
    /// and I/O or JSON errors if compression or serialization fail.
    ///
    /// # Examples
    ///
    /// ```
    /// # use plugpack_format::{MAGIC, Package};
    /// # fn demo(package: &Package) -> plugpack_format::Result<()> {
    /// let raw = package.encode()?;
    /// assert!(raw.starts_with(MAGIC));
    /// # Ok(())
    /// # }
    /// ```
    pub fn encode(&self) -> Result<Vec<u8>> {
        validate(self)?;

        let canonical = serde_json::to_vec(&EnvelopeRef {
            format_version: FORMAT_VERSION,
            package: self,
        })?;
        let digest = sha1_digest(&canonical);

        let mut encoder = ZlibEncoder::new(
            Vec::with_capacity(canonical.len() / 2),
            Compression::best(),
        );
        encoder.write_all(&canonical)?;
        let compressed = encoder.finish()?;

        let mut raw = Vec::with_capacity(HEADER_LEN + compressed.len());
        raw.extend_from_slice(MAGIC);
        raw.extend_from_slice(&digest);
        raw.extend_from_slice(&compressed);

        tracing::debug!(
            "Encoded package {}: {} canonical bytes, {} on the wire",
            self.name,
            canonical.len(),
            raw.len()
        );
        Ok(raw)
    }

    /// Decodes and verifies a package from binary wire form, with the
    /// default decompressed-size bound of [`DEFAULT_MAX_PAYLOAD`].
    ///
    /// # Errors
    ///
    /// See [`Package::decode_with_limit`].
    pub fn decode(raw: &[u8]) -> Result<Self> {
        Self::decode_with_limit(raw, DEFAULT_MAX_PAYLOAD)
    }

    /// Decodes and verifies a package from binary wire form.
    ///
    /// Checks run cheapest-first:
    ///
    /// 1. Magic marker — O(1) rejection of non-package blobs before any
    ///    decompression work.
    /// 2. Bounded zlib decompression of the payload; decompression stops
    ///    as soon as `max_payload` decompressed bytes are exceeded.
    /// 3. SHA-1 of the decompressed bytes against the header digest,
    ///    compared in constant time.
    /// 4. Structural decode into the canonical record shape.
    /// 5. Full schema validation — decode is the trust boundary, so prior
    ///    encode-side validation is never trusted.
    ///
    /// # Errors
    ///
    /// * [`PackageError::WrongMagic`] — input does not start with the marker
    /// * [`PackageError::Truncated`] — input shorter than the fixed header
    /// * [`PackageError::PayloadTooLarge`] — decompressed size exceeds `max_payload`
    /// * [`PackageError::Malformed`] — decompression failure or wrong record shape
    /// * [`PackageError::DigestMismatch`] — payload does not match the header digest
    /// * [`PackageError::Schema`] — a field violates the schema
    pub fn decode_with_limit(raw: &[u8], max_payload: u64) -> Result<Self> {
        if raw.len() < MAGIC.len() || &raw[..MAGIC.len()] != MAGIC {
            return Err(PackageError::WrongMagic);
        }
        if raw.len() < HEADER_LEN {
            return Err(PackageError::Truncated);
        }

        let expected_digest = &raw[MAGIC.len()..HEADER_LEN];
        let compressed = &raw[HEADER_LEN..];

        // Reading one byte past the bound distinguishes "exactly at the
        // bound" from "past it" without decompressing further.
        let mut canonical = Vec::new();
        ZlibDecoder::new(compressed)
            .take(max_payload.saturating_add(1))
            .read_to_end(&mut canonical)
            .map_err(|e| PackageError::Malformed {
                reason: format!("decompression failed: {e}"),
            })?;
        if canonical.len() as u64 > max_payload {
            return Err(PackageError::PayloadTooLarge { limit: max_payload });
        }

        let digest = sha1_digest(&canonical);
        if !constant_time_eq(&digest, expected_digest) {
            return Err(PackageError::DigestMismatch);
        }

        let envelope: Envelope =
            serde_json::from_slice(&canonical).map_err(|_| PackageError::Malformed {
                reason: "not a valid package structure".to_string(),
            })?;
        if envelope.format_version != FORMAT_VERSION {
            return Err(PackageError::Malformed {
                reason: format!(
                    "unsupported format version: {} (expected {FORMAT_VERSION})",
                    envelope.format_version
                ),
            });
        }

        let package = envelope.package;
        validate(&package)?;

        tracing::debug!(
            "Decoded package {}: {} canonical bytes",
            package.name,
            canonical.len()
        );
        Ok(package)
    }
}
