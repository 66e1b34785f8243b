//! The extended filesystem contract.

use std::path::{Path, PathBuf};

use crate::{File, FileMode, Filer, FsError};

/// A complete filesystem: the [`Filer`] operations plus navigation,
/// convenience open/create and recursive operations.
///
/// Any filer can be upgraded to this trait with
/// [`ExtendedFs::new`](crate::ExtendedFs::new); implementing it by hand is
/// only needed for backends that want full control.
///
/// # Working Directory
///
/// Relative paths given to any method are resolved against the working
/// directory set by [`chdir`](Self::chdir). Changing it needs `&mut self`, so
/// one instance cannot be re-pointed while another thread resolves paths
/// through it. Share a backend between threads by giving each thread its own
/// wrapper, or by using absolute paths only.
///
/// # Example
///
/// ```rust
/// use anyfs_extend::{File, FileMode, FileSystem, FsError, UnseekableFile};
/// use std::path::Path;
///
/// fn stage_report<F: FileSystem>(fs: &mut F) -> Result<(), FsError> {
///     fs.mkdir_all(Path::new("/reports/2024"), FileMode::DEFAULT_DIR)?;
///     fs.chdir(Path::new("/reports/2024"))?;
///
///     let mut file = fs.create(Path::new("summary.txt"))?;
///     file.write_str("all green\n")?;
///     file.close()?;
///
///     fs.remove_all(Path::new("/reports"))
/// }
/// ```
pub trait FileSystem: Filer {
    /// The path separator used by this filesystem.
    fn separator(&self) -> char;

    /// The separator between entries of a path list.
    fn list_separator(&self) -> char;

    /// Change the working directory.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if `dir` does not exist
    /// - [`FsError::NotADirectory`] if `dir` is not a directory
    fn chdir(&mut self, dir: &Path) -> Result<(), FsError>;

    /// The current working directory.
    fn getwd(&self) -> Result<PathBuf, FsError>;

    /// Directory for temporary files.
    fn temp_dir(&self) -> PathBuf;

    /// Open an existing file for reading.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    fn open(&self, path: &Path) -> Result<Box<dyn File>, FsError>;

    /// Create a file for reading and writing, truncating it if it exists.
    fn create(&self, path: &Path) -> Result<Box<dyn File>, FsError>;

    /// Create `path` and every missing parent directory.
    ///
    /// Succeeds if the directory already exists.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotADirectory`] if a component exists but is not a directory
    fn mkdir_all(&self, path: &Path, mode: FileMode) -> Result<(), FsError>;

    /// Remove `path` and, if it is a directory, everything below it.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    fn remove_all(&self, path: &Path) -> Result<(), FsError>;

    /// Resize the file at `path` to `size` bytes, padding with zeros.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the file does not exist
    fn truncate(&self, path: &Path, size: u64) -> Result<(), FsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_system_is_object_safe() {
        fn _check(_: &mut dyn FileSystem) {}
    }
}
