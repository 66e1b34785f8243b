//! The minimal filer contract and its optional native operations.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::{Capabilities, File, FileMode, FsError, Metadata, OpenFlags};

/// The smallest set of operations a backend must provide.
///
/// Everything in [`FileSystem`](crate::FileSystem) can be built from these
/// eight methods; wrap a filer with [`ExtendedFs::new`](crate::ExtendedFs::new)
/// to get the rest.
///
/// The filer owns path semantics. No ordering or uniqueness rule is imposed
/// on the paths it receives.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn Filer`.
pub trait Filer {
    /// Open `path` with the given flags, creating it with `mode` if asked to.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist and `CREATE` is not set
    /// - [`FsError::AlreadyExists`] if `CREATE | EXCL` is set and the path exists
    /// - [`FsError::PermissionDenied`] if access is denied
    fn open_file(
        &self,
        path: &Path,
        flags: OpenFlags,
        mode: FileMode,
    ) -> Result<Box<dyn File>, FsError>;

    /// Create a single directory (parent must exist).
    ///
    /// # Errors
    ///
    /// - [`FsError::AlreadyExists`] if the path already exists
    /// - [`FsError::NotFound`] if the parent does not exist
    fn mkdir(&self, path: &Path, mode: FileMode) -> Result<(), FsError>;

    /// Remove a file or an empty directory.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    /// - [`FsError::DirectoryNotEmpty`] if the directory still has entries
    fn remove(&self, path: &Path) -> Result<(), FsError>;

    /// Rename or move `from` to `to`.
    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError>;

    /// Metadata for `path`.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    fn stat(&self, path: &Path) -> Result<Metadata, FsError>;

    /// Change the permission bits of `path`.
    fn chmod(&self, path: &Path, mode: FileMode) -> Result<(), FsError>;

    /// Change the access and modification times of `path`.
    fn chtimes(&self, path: &Path, atime: SystemTime, mtime: SystemTime) -> Result<(), FsError>;

    /// Change the owner and group of `path`.
    fn chown(&self, path: &Path, uid: u32, gid: u32) -> Result<(), FsError>;

    /// Optional operations this filer implements itself.
    ///
    /// Return `Some(self)` from a filer that also implements [`NativeOps`].
    fn native_ops(&self) -> Option<&dyn NativeOps> {
        None
    }
}

/// Optional operations a filer may implement natively.
///
/// [`ExtendedFs`](crate::ExtendedFs) calls a method here only when the
/// matching bit is present in [`capabilities`](Self::capabilities), which it
/// reads once at construction. Methods left at their defaults report
/// [`FsError::NotSupported`] or the host default.
///
/// # Example
///
/// ```rust
/// use anyfs_extend::{Capabilities, FileMode, FsError, NativeOps};
/// use std::path::Path;
///
/// struct FlatStore;
///
/// impl NativeOps for FlatStore {
///     fn capabilities(&self) -> Capabilities {
///         Capabilities::MKDIR_ALL | Capabilities::SEPARATOR
///     }
///
///     fn mkdir_all(&self, _path: &Path, _mode: FileMode) -> Result<(), FsError> {
///         // directories are implicit in a flat key space
///         Ok(())
///     }
///
///     fn separator(&self) -> char {
///         '/'
///     }
/// }
/// ```
pub trait NativeOps {
    /// Which of the methods below are implemented.
    fn capabilities(&self) -> Capabilities;

    /// Open for reading ([`Capabilities::OPEN`]).
    fn open(&self, _path: &Path) -> Result<Box<dyn File>, FsError> {
        Err(FsError::NotSupported { operation: "open" })
    }

    /// Create or truncate ([`Capabilities::CREATE`]).
    fn create(&self, _path: &Path) -> Result<Box<dyn File>, FsError> {
        Err(FsError::NotSupported { operation: "create" })
    }

    /// Change the backend's working directory ([`Capabilities::NAVIGATE`]).
    fn chdir(&self, _dir: &Path) -> Result<(), FsError> {
        Err(FsError::NotSupported { operation: "chdir" })
    }

    /// The backend's working directory ([`Capabilities::NAVIGATE`]).
    fn getwd(&self) -> Result<PathBuf, FsError> {
        Err(FsError::NotSupported { operation: "getwd" })
    }

    /// Recursive directory creation ([`Capabilities::MKDIR_ALL`]).
    fn mkdir_all(&self, _path: &Path, _mode: FileMode) -> Result<(), FsError> {
        Err(FsError::NotSupported {
            operation: "mkdir_all",
        })
    }

    /// Recursive removal ([`Capabilities::REMOVE_ALL`]).
    fn remove_all(&self, _path: &Path) -> Result<(), FsError> {
        Err(FsError::NotSupported {
            operation: "remove_all",
        })
    }

    /// Truncate by path ([`Capabilities::TRUNCATE`]).
    fn truncate(&self, _path: &Path, _size: u64) -> Result<(), FsError> {
        Err(FsError::NotSupported {
            operation: "truncate",
        })
    }

    /// Path separator ([`Capabilities::SEPARATOR`]).
    fn separator(&self) -> char {
        std::path::MAIN_SEPARATOR
    }

    /// Path list separator ([`Capabilities::LIST_SEPARATOR`]).
    fn list_separator(&self) -> char {
        crate::path_resolver::HOST_LIST_SEPARATOR
    }

    /// Temporary directory ([`Capabilities::TEMP_DIR`]).
    fn temp_dir(&self) -> PathBuf {
        std::env::temp_dir()
    }
}

macro_rules! forward_filer {
    () => {
        fn open_file(
            &self,
            path: &Path,
            flags: OpenFlags,
            mode: FileMode,
        ) -> Result<Box<dyn File>, FsError> {
            (**self).open_file(path, flags, mode)
        }

        fn mkdir(&self, path: &Path, mode: FileMode) -> Result<(), FsError> {
            (**self).mkdir(path, mode)
        }

        fn remove(&self, path: &Path) -> Result<(), FsError> {
            (**self).remove(path)
        }

        fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError> {
            (**self).rename(from, to)
        }

        fn stat(&self, path: &Path) -> Result<Metadata, FsError> {
            (**self).stat(path)
        }

        fn chmod(&self, path: &Path, mode: FileMode) -> Result<(), FsError> {
            (**self).chmod(path, mode)
        }

        fn chtimes(
            &self,
            path: &Path,
            atime: SystemTime,
            mtime: SystemTime,
        ) -> Result<(), FsError> {
            (**self).chtimes(path, atime, mtime)
        }

        fn chown(&self, path: &Path, uid: u32, gid: u32) -> Result<(), FsError> {
            (**self).chown(path, uid, gid)
        }

        fn native_ops(&self) -> Option<&dyn NativeOps> {
            (**self).native_ops()
        }
    };
}

// Shared backends: several wrappers may front the same filer, each with its
// own working directory.
impl<T: Filer + ?Sized> Filer for &T {
    forward_filer!();
}

impl<T: Filer + ?Sized> Filer for Box<T> {
    forward_filer!();
}

impl<T: Filer + ?Sized> Filer for Arc<T> {
    forward_filer!();
}
