//! The directory tree value type.
//!
//! [`DirTree`] is a recursive mapping from entry names to [`Node`]s, where
//! a node is either file bytes or a nested subtree. The two-variant enum
//! keeps the recursive packer, unpacker, and validator exhaustive instead
//! of relying on ad hoc type inspection.
//!
//! Entries live in a `BTreeMap`, so iteration order (and therefore the
//! canonical serialized form of a tree) is deterministic.

use crate::error::{Result, TreeError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry in a directory tree: a regular file or a subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// A regular file with its full contents.
    File(Vec<u8>),
    /// A nested directory.
    Dir(DirTree),
}

impl Node {
    /// Returns `true` if this node is a regular file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    /// Returns `true` if this node is a subtree.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self, Self::Dir(_))
    }
}

/// An in-memory directory tree.
///
/// Names are unique within one level; the tree is acyclic by construction
/// since nodes own their subtrees.
///
/// # Examples
///
/// ```
/// use plugpack_tree::DirTree;
///
/// let mut tree = DirTree::new();
/// tree.insert_file("readme.txt", b"hello".to_vec()).unwrap();
/// assert_eq!(tree.len(), 1);
/// assert_eq!(tree.file_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirTree {
    entries: BTreeMap<String, Node>,
}

impl DirTree {
    /// Creates a new empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Inserts a file entry, replacing any existing entry with the same name.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidName`] if `name` is not a valid single
    /// filesystem component.
    pub fn insert_file(&mut self, name: impl Into<String>, contents: Vec<u8>) -> Result<()> {
        let name = name.into();
        validate_entry_name(&name)?;
        self.entries.insert(name, Node::File(contents));
        Ok(())
    }

    /// Inserts a subtree entry, replacing any existing entry with the same name.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidName`] if `name` is not a valid single
    /// filesystem component.
    pub fn insert_dir(&mut self, name: impl Into<String>, subtree: Self) -> Result<()> {
        let name = name.into();
        validate_entry_name(&name)?;
        self.entries.insert(name, Node::Dir(subtree));
        Ok(())
    }

    /// Looks up a direct child by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.entries.get(name)
    }

    /// Iterates over the direct children in name order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if this level has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of files in the whole tree, recursively.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.entries
            .values()
            .map(|node| match node {
                Node::File(_) => 1,
                Node::Dir(sub) => sub.file_count(),
            })
            .sum()
    }

    /// Checks every entry name in the tree, recursively.
    ///
    /// The insert API already validates names, but trees decoded from
    /// untrusted bytes bypass it, so package validation calls this on
    /// every embedded tree.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidName`] for the first offending entry.
    pub fn validate(&self) -> Result<()> {
        for (name, node) in &self.entries {
            validate_entry_name(name)?;
            if let Node::Dir(sub) = node {
                sub.validate()?;
            }
        }
        Ok(())
    }
}

/// Validates that a name is safe to use as a single directory entry.
///
/// Rejects names that:
/// - Are empty
/// - Are `.` or `..`
/// - Contain path separators (/ or \)
/// - Contain control characters
///
/// # Errors
///
/// Returns [`TreeError::InvalidName`] if the name is invalid.
pub fn validate_entry_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(TreeError::InvalidName {
            name: name.to_string(),
            reason: "entry name cannot be empty".to_string(),
        });
    }

    if name == "." || name == ".." {
        return Err(TreeError::InvalidName {
            name: name.to_string(),
            reason: "entry name cannot be '.' or '..'".to_string(),
        });
    }

    if name.contains('/') || name.contains('\\') {
        return Err(TreeError::InvalidName {
            name: name.to_string(),
            reason: "entry name cannot contain path separators".to_string(),
        });
    }

    if name.chars().any(char::is_control) {
        return Err(TreeError::InvalidName {
            name: name.to_string(),
            reason: "entry name cannot contain control characters".to_string(),
        });
    }

    Ok(())
}
