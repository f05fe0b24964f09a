//! Plugin distribution package format.
//!
//! A plugin package is a self-contained, integrity-checked, compressed
//! binary container bundling a plugin's code, structured metadata, and
//! optional embedded directory trees (public assets, private assets,
//! template sources). Packages travel between plugin authors, a
//! network-distributed repository, and CMS installations as opaque bytes,
//! so the decoder treats its input as untrusted.
//!
//! # Wire format
//!
//! ```text
//! offset 0   14 bytes  ASCII magic marker "R7RPLGPACKV001"
//! offset 14  20 bytes  SHA-1 digest (binary) of the canonical payload
//! offset 34  rest      zlib-compressed canonical JSON payload
//! ```
//!
//! The digest is computed over the *uncompressed* canonical bytes, so
//! compression-library differences never affect integrity checking. The
//! canonical payload is deterministic: struct fields serialize in
//! declaration order and tree entries in name order, so identical packages
//! yield identical bytes across re-encodes.
//!
//! # Examples
//!
//! ## Encoding a package
//!
//! ```
//! use plugpack_format::Package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let package = Package {
//!     code: "fn entry() {}".to_string(),
//!     class_name: "HelloPlugin".to_string(),
//!     name: "hello".to_string(),
//!     author: "Jane Doe <jane@example.org>".to_string(),
//!     version_text: "1.1 Beta".to_string(),
//!     version_count: 3,
//!     api_version: 1,
//!     short_description: "Says hello.".to_string(),
//!     update_path: None,
//!     web: Some("https://example.org/hello".to_string()),
//!     license: None,
//!     help: None,
//!     public_assets: None,
//!     private_assets: None,
//!     templates: None,
//! };
//!
//! let raw = package.encode()?;
//! let decoded = Package::decode(&raw)?;
//! assert_eq!(decoded, package);
//! # Ok(())
//! # }
//! ```
//!
//! ## Listing without touching code
//!
//! ```
//! # use plugpack_format::Package;
//! # fn listing(package: &Package) {
//! let meta = package.extract_meta();
//! println!("{} by {} ({})", meta.name, meta.author, meta.version_text);
//! # }
//! ```
//!
//! # Security
//!
//! - Packages are validated on every encode and again on every decode;
//!   decode is the trust boundary.
//! - The payload decodes into a statically-shaped record, never into live
//!   objects.
//! - Decompression is bounded ([`DEFAULT_MAX_PAYLOAD`]) so a small hostile
//!   blob cannot expand into arbitrary memory.
//! - The digest comparison is constant-time.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod codec;
pub mod digest;
pub mod error;
pub mod package;
pub mod validate;

// Re-export main types
pub use codec::{DEFAULT_MAX_PAYLOAD, FORMAT_VERSION, MAGIC};
pub use digest::constant_time_eq;
pub use error::{PackageError, Result};
pub use package::{Package, PackageMeta};
pub use validate::validate;
