//! # Extension Traits
//!
//! Convenience methods for any [`FileSystem`].
//!
//! ## Overview
//!
//! [`FileSystemExt`] provides commonly-needed whole-file helpers that aren't
//! part of the core contracts. They are default methods with a blanket
//! implementation, so every `FileSystem` gets them for free.
//!
//! ## Available Methods
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`read_file`](FileSystemExt::read_file) | Read a whole file |
//! | [`write_file`](FileSystemExt::write_file) | Create or replace a file |
//! | [`exists`](FileSystemExt::exists) | Check if a path exists |
//! | [`is_file`](FileSystemExt::is_file) | Check if path is a regular file |
//! | [`is_dir`](FileSystemExt::is_dir) | Check if path is a directory |
//!
//! ## JSON Support (Feature-Gated)
//!
//! With the `serde` feature enabled, [`FileSystemExtJson`] adds:
//!
//! | Method | Description |
//! |--------|-------------|
//! | `read_json` | Read and deserialize JSON file |
//! | `write_json` | Serialize and write JSON file |
//!
//! Enable with:
//! ```toml
//! [dependencies]
//! anyfs-extend = { version = "0.1", features = ["serde"] }
//! ```

use std::io;
use std::path::Path;

use crate::error::keep_first;
use crate::{FileSystem, FsError, UnseekableFile};

/// Extension methods for any filesystem.
///
/// # Example
///
/// ```rust
/// use anyfs_extend::{FileSystem, FileSystemExt, FsError};
/// use std::path::Path;
///
/// fn bump_counter<F: FileSystem>(fs: &F) -> Result<(), FsError> {
///     let path = Path::new("/counter");
///     let count: u64 = if fs.is_file(path)? {
///         String::from_utf8_lossy(&fs.read_file(path)?).trim().parse().unwrap_or(0)
///     } else {
///         0
///     };
///     fs.write_file(path, (count + 1).to_string().as_bytes())
/// }
/// ```
pub trait FileSystemExt: FileSystem {
    /// Read the whole file at `path`.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the file does not exist
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        let mut file = self.open(path)?;
        let mut data = Vec::new();
        let read = io::Read::read_to_end(&mut file, &mut data)
            .map(drop)
            .map_err(|e| FsError::from_io(e, "read_file", path));
        keep_first(read, file.close())?;
        Ok(data)
    }

    /// Create or truncate `path` and write `data` to it.
    ///
    /// # Errors
    ///
    /// - [`FsError::Io`] with [`std::io::ErrorKind::WriteZero`] if the handle
    ///   stops accepting bytes
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        let mut file = self.create(path)?;
        let written = io::Write::write_all(&mut file, data)
            .map_err(|e| FsError::from_io(e, "write_file", path));
        keep_first(written, file.close())
    }

    /// Check if `path` exists.
    ///
    /// Returns `Ok(false)` if the path doesn't exist (not an error).
    /// Returns `Err` only for other failures (permission denied, etc.).
    fn exists(&self, path: &Path) -> Result<bool, FsError> {
        match self.stat(path) {
            Ok(_) => Ok(true),
            Err(FsError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Check if the path points to a regular file.
    ///
    /// Returns `Ok(false)` if the path doesn't exist (not an error).
    fn is_file(&self, path: &Path) -> Result<bool, FsError> {
        match self.stat(path) {
            Ok(m) => Ok(m.is_file()),
            Err(FsError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Check if the path points to a directory.
    ///
    /// Returns `Ok(false)` if the path doesn't exist (not an error).
    fn is_dir(&self, path: &Path) -> Result<bool, FsError> {
        match self.stat(path) {
            Ok(m) => Ok(m.is_dir()),
            Err(FsError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

// Blanket implementation - any FileSystem gets FileSystemExt for free
impl<F: FileSystem + ?Sized> FileSystemExt for F {}

#[cfg(feature = "serde")]
mod json {
    use super::FileSystemExt;
    use crate::{FileSystem, FsError};
    use serde::{Serialize, de::DeserializeOwned};
    use std::path::Path;

    /// JSON helpers for any filesystem (requires `serde` feature).
    pub trait FileSystemExtJson: FileSystem {
        /// Read and deserialize a JSON file.
        ///
        /// # Errors
        ///
        /// - `FsError::Deserialization`: JSON parsing failed
        /// - Other `FsError` variants from [`read_file`](FileSystemExt::read_file)
        fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T, FsError> {
            let data = self.read_file(path)?;
            serde_json::from_slice(&data).map_err(|e| FsError::Deserialization(e.to_string()))
        }

        /// Serialize a value and write it as pretty-printed JSON.
        ///
        /// # Errors
        ///
        /// - `FsError::Serialization`: JSON serialization failed
        /// - Other `FsError` variants from [`write_file`](FileSystemExt::write_file)
        fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), FsError> {
            let json = serde_json::to_vec_pretty(value)
                .map_err(|e| FsError::Serialization(e.to_string()))?;
            self.write_file(path, &json)
        }
    }

    // Blanket implementation
    impl<F: FileSystem + ?Sized> FileSystemExtJson for F {}
}

#[cfg(feature = "serde")]
pub use json::FileSystemExtJson;
