//! Error types for directory tree operations.

use std::path::PathBuf;

/// Result type for directory tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors that can occur while packing, unpacking, or validating trees.
#[derive(thiserror::Error, Debug)]
pub enum TreeError {
    /// The pack root exists but is not a directory, or does not exist.
    #[error("Not a directory: {path}")]
    NotADirectory {
        /// The offending path
        path: PathBuf,
    },

    /// An entry name is not a valid single filesystem component.
    ///
    /// Names containing path separators or parent-directory references
    /// would escape the unpack root, so they are rejected both on insert
    /// and again before any write.
    #[error("Invalid entry name: {name:?} ({reason})")]
    InvalidName {
        /// The rejected entry name
        name: String,
        /// Why the name was rejected
        reason: String,
    },

    /// I/O failure while reading the source directory or writing the
    /// destination. Surfaced to the caller, never retried internally.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TreeError {
    /// Returns `true` if this error was caused by the tree value itself
    /// rather than by the filesystem.
    #[must_use]
    pub const fn is_invalid_tree(&self) -> bool {
        matches!(self, Self::InvalidName { .. })
    }
}
