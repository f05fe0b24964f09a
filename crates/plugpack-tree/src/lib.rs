//! In-memory directory trees for plugin packages.
//!
//! A [`DirTree`] models a filesystem subtree as a pure value: an ordered
//! mapping from entry names to either file bytes or nested subtrees. Trees
//! are embedded in plugin packages (public assets, private assets, template
//! sources) and round-trip between disk and memory:
//!
//! - [`DirTree::from_dir`] packs a directory recursively into a value.
//! - [`DirTree::write_to`] unpacks a value back onto disk.
//!
//! Trees carry no integrity or network concerns; those belong to the
//! package codec that embeds them.
//!
//! # Examples
//!
//! ```
//! use plugpack_tree::{DirTree, Node};
//!
//! let mut assets = DirTree::new();
//! assets.insert_file("logo.png", vec![0x89, 0x50, 0x4E, 0x47]).unwrap();
//!
//! let mut css = DirTree::new();
//! css.insert_file("main.css", b"body {}".to_vec()).unwrap();
//! assets.insert_dir("css", css).unwrap();
//!
//! assert_eq!(assets.file_count(), 2);
//! assert!(matches!(assets.get("logo.png"), Some(Node::File(_))));
//! ```
//!
//! # Security
//!
//! Entry names are validated to be single filesystem components (no path
//! separators, no `.`/`..`, no control characters), both when trees are
//! built through the API and again before anything is written to disk.
//! Trees arriving from untrusted bytes must be re-checked with
//! [`DirTree::validate`] since deserialization bypasses the insert API.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod error;
pub mod fs;
pub mod tree;

pub use error::{Result, TreeError};
pub use tree::{DirTree, Node};
