//! Error types for package encoding, decoding, and validation.

/// Result type for package format operations.
pub type Result<T> = std::result::Result<T, PackageError>;

/// Errors that can occur while encoding, decoding, or validating packages.
///
/// Every variant except [`Io`](Self::Io) and [`Json`](Self::Json) marks the
/// input as an invalid package: the bytes or the in-memory value failed a
/// format, integrity, or schema check. The `Display` text carries the first
/// failed rule verbatim, for use in caller diagnostics.
#[derive(thiserror::Error, Debug)]
pub enum PackageError {
    /// The input does not start with the package magic marker.
    ///
    /// Raised before any decompression or digest work, giving O(1)
    /// rejection of arbitrary non-package blobs.
    #[error("wrong magic number")]
    WrongMagic,

    /// The input carries the magic marker but is shorter than the fixed
    /// header (magic plus digest).
    #[error("truncated package header")]
    Truncated,

    /// The compressed payload would decompress past the configured bound.
    ///
    /// A hostile sender can submit a small compressed blob that expands to
    /// an arbitrarily large size, so decompression stops as soon as the
    /// bound is exceeded.
    #[error("decompressed payload exceeds {limit} bytes")]
    PayloadTooLarge {
        /// The decompressed-size bound that was exceeded
        limit: u64,
    },

    /// The recomputed SHA-1 digest of the decompressed payload does not
    /// match the digest stored in the header.
    #[error("wrong hash")]
    DigestMismatch,

    /// The payload could not be decompressed or does not decode into the
    /// package record shape.
    #[error("{reason}")]
    Malformed {
        /// Why the payload is malformed
        reason: String,
    },

    /// A field of an otherwise well-shaped package violates the schema.
    #[error("{reason}")]
    Schema {
        /// The first violated schema rule
        reason: String,
    },

    /// I/O failure while compressing or decompressing.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure while producing the canonical payload.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PackageError {
    /// Returns `true` if this error means the package itself is invalid,
    /// as opposed to an environmental failure.
    ///
    /// Invalid-package errors are recoverable by the caller: reject the
    /// upload, show the reason, move on.
    #[must_use]
    pub const fn is_invalid_package(&self) -> bool {
        matches!(
            self,
            Self::WrongMagic
                | Self::Truncated
                | Self::PayloadTooLarge { .. }
                | Self::DigestMismatch
                | Self::Malformed { .. }
                | Self::Schema { .. }
        )
    }
}
