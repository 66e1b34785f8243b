//! # Extended Filesystem
//!
//! [`ExtendedFs`] turns any [`Filer`] into a [`FileSystem`].
//!
//! ## How It Works
//!
//! ```text
//! Filer ──ExtendedFs::new──▶ query native_ops() once ──▶ ExtendedFs<F>
//!                                                          │
//!            every call: resolve path ─▶ native bit set? ──┼─ yes ─▶ NativeOps method
//!                                                          └─ no ──▶ generic version
//! ```
//!
//! The generic versions are built from the eight [`Filer`] methods only:
//!
//! | Operation | Generic version |
//! |-----------|-----------------|
//! | `open` | `open_file(path, RDONLY, 0)` |
//! | `create` | `open_file(path, CREATE \| RDWR \| TRUNC, 0o666)` |
//! | `chdir` | open, stat the handle, require a directory, close |
//! | `getwd` | the tracked working directory |
//! | `mkdir_all` | `mkdir` per component, existing directories accepted |
//! | `remove_all` | depth-first removal in batches of directory names |
//! | `truncate` | open for writing, `set_len`, close |
//! | separators, `temp_dir` | host defaults |
//!
//! Cleanup never masks the error that caused it: when an operation fails and
//! closing its handle fails too, the operation's error is reported.

use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, trace};

use crate::error::keep_first;
use crate::path_resolver::HOST_LIST_SEPARATOR;
use crate::{
    Capabilities, File, FileMode, FileSystem, Filer, FsError, Metadata, NativeOps, OpenFlags,
    PathResolver, SymLinker, UnseekableFile,
};

/// Names requested per `read_dir_names` call while removing a directory.
const REMOVE_BATCH: usize = 512;

/// A [`Filer`] upgraded to a full [`FileSystem`].
///
/// Holds the wrapped filer, the capability set it advertised at construction
/// and a working directory starting at `/`.
///
/// # Example
///
/// ```rust
/// use anyfs_extend::{ExtendedFs, Filer, FileSystem, FsError};
/// use std::path::Path;
///
/// fn prepare<F: Filer>(filer: F) -> Result<ExtendedFs<F>, FsError> {
///     let mut fs = ExtendedFs::new(filer);
///     fs.mkdir_all(Path::new("/var/cache"), anyfs_extend::FileMode::DEFAULT_DIR)?;
///     fs.chdir(Path::new("/var/cache"))?;
///     Ok(fs)
/// }
/// ```
#[derive(Debug)]
pub struct ExtendedFs<F> {
    filer: F,
    caps: Capabilities,
    resolver: PathResolver,
}

impl<F: Filer> ExtendedFs<F> {
    /// Wrap `filer`, reading its native capabilities once.
    pub fn new(filer: F) -> Self {
        let caps = filer
            .native_ops()
            .map(|native| native.capabilities())
            .unwrap_or_default();
        debug!(capabilities = ?caps, "extending filer");
        Self {
            filer,
            caps,
            resolver: PathResolver::new(caps.contains(Capabilities::NAVIGATE)),
        }
    }

    /// The native operations found at construction.
    #[inline]
    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    /// The wrapped filer.
    #[inline]
    pub fn inner(&self) -> &F {
        &self.filer
    }

    /// Unwrap, returning the filer.
    pub fn into_inner(self) -> F {
        self.filer
    }

    /// Resolve `path` the way every operation of this wrapper does.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.resolver.resolve(path)
    }

    fn native(&self, cap: Capabilities) -> Option<&dyn NativeOps> {
        if self.caps.contains(cap) {
            self.filer.native_ops()
        } else {
            None
        }
    }

    fn open_resolved(&self, path: &Path) -> Result<Box<dyn File>, FsError> {
        match self.native(Capabilities::OPEN) {
            Some(native) => native.open(path),
            None => self
                .filer
                .open_file(path, OpenFlags::RDONLY, FileMode::empty()),
        }
    }

    fn remove_tree(&self, path: &Path) -> Result<(), FsError> {
        let mut handle = self.open_resolved(path)?;
        let emptied = self.remove_children(path, &mut *handle);
        keep_first(emptied, handle.close())?;
        trace!(path = %path.display(), "removing entry");
        self.filer.remove(path)
    }

    fn remove_children(&self, dir: &Path, handle: &mut dyn File) -> Result<(), FsError> {
        if !handle.stat()?.is_dir() {
            return Ok(());
        }
        loop {
            let names = handle.read_dir_names(REMOVE_BATCH)?;
            if names.is_empty() {
                return Ok(());
            }
            for name in names {
                if name == "." || name == ".." {
                    continue;
                }
                self.remove_tree(&dir.join(&name))?;
            }
        }
    }
}

/// Wrap `filer` into a [`FileSystem`]. Same as [`ExtendedFs::new`].
pub fn extend_filer<F: Filer>(filer: F) -> ExtendedFs<F> {
    ExtendedFs::new(filer)
}

/// Fluent construction of [`ExtendedFs`].
///
/// # Example
///
/// ```rust
/// use anyfs_extend::{ExtendedFs, Filer, FilerExt};
///
/// fn wrap<F: Filer>(filer: F) -> ExtendedFs<F> {
///     filer.extend()
/// }
/// ```
pub trait FilerExt: Filer + Sized {
    /// Wrap this filer into an [`ExtendedFs`].
    fn extend(self) -> ExtendedFs<Self> {
        ExtendedFs::new(self)
    }
}

impl<F: Filer> FilerExt for F {}

impl<F: Filer> Filer for ExtendedFs<F> {
    fn open_file(
        &self,
        path: &Path,
        flags: OpenFlags,
        mode: FileMode,
    ) -> Result<Box<dyn File>, FsError> {
        self.filer.open_file(&self.resolve(path), flags, mode)
    }

    fn mkdir(&self, path: &Path, mode: FileMode) -> Result<(), FsError> {
        self.filer.mkdir(&self.resolve(path), mode)
    }

    fn remove(&self, path: &Path) -> Result<(), FsError> {
        self.filer.remove(&self.resolve(path))
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        self.filer.rename(&self.resolve(from), &self.resolve(to))
    }

    fn stat(&self, path: &Path) -> Result<Metadata, FsError> {
        self.filer.stat(&self.resolve(path))
    }

    fn chmod(&self, path: &Path, mode: FileMode) -> Result<(), FsError> {
        self.filer.chmod(&self.resolve(path), mode)
    }

    fn chtimes(&self, path: &Path, atime: SystemTime, mtime: SystemTime) -> Result<(), FsError> {
        self.filer.chtimes(&self.resolve(path), atime, mtime)
    }

    fn chown(&self, path: &Path, uid: u32, gid: u32) -> Result<(), FsError> {
        self.filer.chown(&self.resolve(path), uid, gid)
    }
}

impl<F: Filer> FileSystem for ExtendedFs<F> {
    fn separator(&self) -> char {
        match self.native(Capabilities::SEPARATOR) {
            Some(native) => native.separator(),
            None => std::path::MAIN_SEPARATOR,
        }
    }

    fn list_separator(&self) -> char {
        match self.native(Capabilities::LIST_SEPARATOR) {
            Some(native) => native.list_separator(),
            None => HOST_LIST_SEPARATOR,
        }
    }

    fn chdir(&mut self, dir: &Path) -> Result<(), FsError> {
        if let Some(native) = self.native(Capabilities::NAVIGATE) {
            return native.chdir(dir);
        }

        let resolved = self.resolve(dir);
        let mut handle = self.open_resolved(&resolved)?;
        let checked = handle.stat().and_then(|meta| {
            if meta.is_dir() {
                Ok(())
            } else {
                Err(FsError::NotADirectory {
                    path: dir.to_path_buf(),
                    operation: "chdir",
                })
            }
        });
        keep_first(checked, handle.close())?;

        self.resolver.set_cwd(&resolved);
        debug!(cwd = %self.resolver.cwd().display(), "changed working directory");
        Ok(())
    }

    fn getwd(&self) -> Result<PathBuf, FsError> {
        match self.native(Capabilities::NAVIGATE) {
            Some(native) => native.getwd(),
            None => Ok(self.resolver.cwd().to_path_buf()),
        }
    }

    fn temp_dir(&self) -> PathBuf {
        match self.native(Capabilities::TEMP_DIR) {
            Some(native) => native.temp_dir(),
            None => std::env::temp_dir(),
        }
    }

    fn open(&self, path: &Path) -> Result<Box<dyn File>, FsError> {
        self.open_resolved(&self.resolve(path))
    }

    fn create(&self, path: &Path) -> Result<Box<dyn File>, FsError> {
        let path = self.resolve(path);
        match self.native(Capabilities::CREATE) {
            Some(native) => native.create(&path),
            None => self.filer.open_file(
                &path,
                OpenFlags::CREATE | OpenFlags::RDWR | OpenFlags::TRUNC,
                FileMode::DEFAULT_FILE,
            ),
        }
    }

    fn mkdir_all(&self, path: &Path, mode: FileMode) -> Result<(), FsError> {
        let path = self.resolve(path);
        if let Some(native) = self.native(Capabilities::MKDIR_ALL) {
            return native.mkdir_all(&path, mode);
        }

        debug!(path = %path.display(), "creating directory tree");
        let mut prefix = PathBuf::new();
        for component in path.components() {
            prefix.push(component);
            if !matches!(component, Component::Normal(_)) {
                continue;
            }
            match self.filer.mkdir(&prefix, mode) {
                Ok(()) => trace!(path = %prefix.display(), "created directory"),
                Err(FsError::AlreadyExists { .. }) => {
                    if !self.filer.stat(&prefix)?.is_dir() {
                        return Err(FsError::NotADirectory {
                            path: prefix,
                            operation: "mkdir_all",
                        });
                    }
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    fn remove_all(&self, path: &Path) -> Result<(), FsError> {
        let path = self.resolve(path);
        if let Some(native) = self.native(Capabilities::REMOVE_ALL) {
            return native.remove_all(&path);
        }

        debug!(path = %path.display(), "removing tree");
        self.remove_tree(&path)
    }

    fn truncate(&self, path: &Path, size: u64) -> Result<(), FsError> {
        let path = self.resolve(path);
        if let Some(native) = self.native(Capabilities::TRUNCATE) {
            return native.truncate(&path, size);
        }

        let mut handle = self
            .filer
            .open_file(&path, OpenFlags::WRONLY, FileMode::empty())?;
        let resized = handle.set_len(size);
        keep_first(resized, handle.close())
    }
}

// Link targets are stored verbatim; only the link itself is resolved.
impl<F: Filer + SymLinker> SymLinker for ExtendedFs<F> {
    fn lstat(&self, path: &Path) -> Result<Metadata, FsError> {
        self.filer.lstat(&self.resolve(path))
    }

    fn lchown(&self, path: &Path, uid: u32, gid: u32) -> Result<(), FsError> {
        self.filer.lchown(&self.resolve(path), uid, gid)
    }

    fn readlink(&self, path: &Path) -> Result<PathBuf, FsError> {
        self.filer.readlink(&self.resolve(path))
    }

    fn symlink(&self, target: &Path, link: &Path) -> Result<(), FsError> {
        self.filer.symlink(target, &self.resolve(link))
    }
}
