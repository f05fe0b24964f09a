//! Filesystem pack and unpack for directory trees.
//!
//! [`DirTree::from_dir`] reads a directory recursively into a tree value;
//! [`DirTree::write_to`] materializes a tree value on disk. Both perform
//! blocking I/O and hold no process-wide state, so independent callers may
//! pack and unpack concurrently as long as their paths do not overlap.

use crate::error::{Result, TreeError};
use crate::tree::{DirTree, Node};
use std::fs;
use std::path::{Path, PathBuf};

/// RAII guard that removes a freshly created unpack root on error.
///
/// When `write_to` creates the destination directory itself, a failure
/// partway through would otherwise leave a half-written tree behind. The
/// guard removes the root unless [`commit`](Self::commit) is called, making
/// a fresh unpack all-or-nothing.
struct UnpackGuard {
    path: PathBuf,
    cleanup: bool,
}

impl UnpackGuard {
    const fn new(path: PathBuf, cleanup: bool) -> Self {
        Self { path, cleanup }
    }

    /// Commits the unpack, disabling cleanup on drop.
    fn commit(mut self) {
        self.cleanup = false;
    }
}

impl Drop for UnpackGuard {
    fn drop(&mut self) {
        if self.cleanup {
            if let Err(e) = fs::remove_dir_all(&self.path) {
                tracing::warn!(
                    "Failed to clean up unpack directory {}: {}",
                    self.path.display(),
                    e
                );
            } else {
                tracing::debug!(
                    "Cleaned up incomplete unpack directory: {}",
                    self.path.display()
                );
            }
        }
    }
}

impl DirTree {
    /// Packs a directory into an in-memory tree.
    ///
    /// Regular files are read fully into memory; subdirectories recurse.
    /// Entries of any other kind (symlinks, devices, sockets) are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotADirectory`] if `path` is not a readable
    /// directory, [`TreeError::InvalidName`] if an entry name is not valid
    /// UTF-8, and [`TreeError::Io`] on read failures.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use plugpack_tree::DirTree;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let templates = DirTree::from_dir("./my-plugin/templates")?;
    /// println!("packed {} files", templates.file_count());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_dir(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(TreeError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        let tree = pack_dir(path)?;
        tracing::debug!(
            "Packed {} files from {}",
            tree.file_count(),
            path.display()
        );
        Ok(tree)
    }

    /// Unpacks the tree into a directory on disk.
    ///
    /// Creates `path` and all missing parents if absent. Files are written
    /// with their full contents, overwriting existing files; subtrees
    /// recurse. The whole tree is re-validated before anything is written,
    /// so a hostile tree cannot write outside `path`.
    ///
    /// # Atomicity
    ///
    /// When this call creates the destination root itself, a failure
    /// partway through removes the root again, so a fresh unpack is
    /// all-or-nothing. Unpacking into a directory that already exists is
    /// not transactional; callers needing that must unpack into a staging
    /// directory and rename on success.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidName`] if the tree contains an unsafe
    /// entry name and [`TreeError::Io`] on write failures.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use plugpack_tree::DirTree;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let tree = DirTree::from_dir("./src-assets")?;
    /// tree.write_to("./installed/assets")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        self.validate()?;

        let path = path.as_ref();
        let created_root = !path.exists();
        if created_root {
            fs::create_dir_all(path)?;
        }

        let guard = UnpackGuard::new(path.to_path_buf(), created_root);
        self.write_entries(path)?;
        guard.commit();

        tracing::debug!(
            "Unpacked {} files into {}",
            self.file_count(),
            path.display()
        );
        Ok(())
    }

    // Callers hold a validated tree; names are safe to join.
    fn write_entries(&self, dir: &Path) -> Result<()> {
        for (name, node) in self.entries() {
            let target = dir.join(name);
            match node {
                Node::File(contents) => fs::write(&target, contents)?,
                Node::Dir(subtree) => {
                    fs::create_dir_all(&target)?;
                    subtree.write_entries(&target)?;
                }
            }
        }
        Ok(())
    }
}

fn pack_dir(dir: &Path) -> Result<DirTree> {
    let mut tree = DirTree::new();

    // read_dir never yields "." or "..".
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let os_name = entry.file_name();
        let Some(name) = os_name.to_str() else {
            return Err(TreeError::InvalidName {
                name: os_name.to_string_lossy().into_owned(),
                reason: "entry name is not valid UTF-8".to_string(),
            });
        };

        if file_type.is_dir() {
            tree.insert_dir(name, pack_dir(&entry.path())?)?;
        } else if file_type.is_file() {
            tree.insert_file(name, fs::read(entry.path())?)?;
        } else {
            // Symlinks, devices and other special entries are out of scope.
            tracing::debug!("Skipping special entry: {}", entry.path().display());
        }
    }

    Ok(tree)
}
