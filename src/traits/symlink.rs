//! Symbolic link operations.

use std::path::{Path, PathBuf};

use crate::{FileSystem, FsError, Metadata};

/// Symbolic link operations, orthogonal to [`FileSystem`].
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn SymLinker`.
pub trait SymLinker {
    /// Metadata of `path` itself, without following a final symlink.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if `path` does not exist
    fn lstat(&self, path: &Path) -> Result<Metadata, FsError>;

    /// Change the owner of `path` itself, without following a final symlink.
    fn lchown(&self, path: &Path, uid: u32, gid: u32) -> Result<(), FsError>;

    /// The raw target of the symlink at `path`.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if `path` does not exist
    /// - [`FsError::InvalidArgument`] if `path` is not a symlink
    fn readlink(&self, path: &Path) -> Result<PathBuf, FsError>;

    /// Create `link` pointing at `target`.
    ///
    /// `target` is stored verbatim and need not exist.
    ///
    /// # Errors
    ///
    /// - [`FsError::AlreadyExists`] if `link` already exists
    fn symlink(&self, target: &Path, link: &Path) -> Result<(), FsError>;
}

/// A filesystem that also supports symbolic links.
///
/// Implemented automatically for every [`FileSystem`] + [`SymLinker`].
pub trait SymlinkFileSystem: FileSystem + SymLinker {}

impl<T: FileSystem + SymLinker + ?Sized> SymlinkFileSystem for T {}
