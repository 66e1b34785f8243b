//! Open file handles.
//!
//! Handles come in three tiers, each a superset of the previous:
//!
//! ```text
//! UnseekableFile ──▶ SeekableFile ──▶ File
//!   read/write        + seek           + read_at/write_at
//!   close/sync                         + write_str/set_len
//!   stat/read_dir                      + read_dir_names
//! ```
//!
//! Filers return [`File`]. The adapters in this crate upgrade the lower tiers:
//! [`extend_unseekable`](crate::extend_unseekable) buffers an unseekable
//! stream, [`extend_seekable`](crate::extend_seekable) synthesizes the
//! positional and convenience methods from `seek`.
//!
//! Handles are owned by whoever opened them and must be closed explicitly;
//! dropping a handle does not report errors.

use std::io::SeekFrom;
use std::path::Path;

use crate::{FileCapabilities, FsError, Metadata};

/// A read/write stream without a movable offset.
pub trait UnseekableFile {
    /// The path the handle was opened with.
    fn name(&self) -> &Path;

    /// Read into `buf`, returning the number of bytes read.
    ///
    /// Returns `Ok(0)` at end of file.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, FsError>;

    /// Write `buf`, returning the number of bytes accepted.
    fn write(&mut self, buf: &[u8]) -> Result<usize, FsError>;

    /// Release the handle. Further use is an error.
    fn close(&mut self) -> Result<(), FsError>;

    /// Commit buffered contents to the backing store.
    fn sync(&mut self) -> Result<(), FsError>;

    /// Metadata of the open entry.
    fn stat(&self) -> Result<Metadata, FsError>;

    /// Read up to `count` directory entries; `0` reads all remaining entries.
    ///
    /// Successive calls continue where the previous one stopped. An empty
    /// batch means the directory is exhausted.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotADirectory`] if the handle is not a directory
    fn read_dir(&mut self, count: usize) -> Result<Vec<Metadata>, FsError>;
}

/// A stream with a movable offset.
pub trait SeekableFile: UnseekableFile {
    /// Move the offset, returning the new position from the start.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidArgument`] if the target lies before the start
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, FsError>;

    /// Natively implemented optional operations, if any.
    ///
    /// [`extend_seekable`](crate::extend_seekable) queries this once and
    /// prefers the advertised methods over its generic versions.
    fn native_ops(&mut self) -> Option<&mut dyn NativeFileOps> {
        None
    }
}

/// A fully featured file handle.
pub trait File: SeekableFile {
    /// Read into `buf` starting at `offset`.
    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> Result<usize, FsError>;

    /// Write `buf` starting at `offset`.
    fn write_at(&mut self, buf: &[u8], offset: u64) -> Result<usize, FsError>;

    /// Write the bytes of `s`.
    fn write_str(&mut self, s: &str) -> Result<usize, FsError>;

    /// Resize the file to exactly `size` bytes.
    ///
    /// Growing pads with zero bytes. The offset is not changed.
    fn set_len(&mut self, size: u64) -> Result<(), FsError>;

    /// Like [`read_dir`](UnseekableFile::read_dir), returning names only.
    fn read_dir_names(&mut self, count: usize) -> Result<Vec<String>, FsError>;
}

/// Optional natively implemented handle operations.
///
/// Implement the methods advertised by [`capabilities`](Self::capabilities);
/// the defaults report [`FsError::NotSupported`].
pub trait NativeFileOps {
    /// Which of the methods below are implemented.
    fn capabilities(&self) -> FileCapabilities;

    /// Positional read ([`FileCapabilities::POSITIONAL`]).
    fn read_at(&mut self, _buf: &mut [u8], _offset: u64) -> Result<usize, FsError> {
        Err(FsError::NotSupported { operation: "read_at" })
    }

    /// Positional write ([`FileCapabilities::POSITIONAL`]).
    fn write_at(&mut self, _buf: &[u8], _offset: u64) -> Result<usize, FsError> {
        Err(FsError::NotSupported { operation: "write_at" })
    }

    /// String write ([`FileCapabilities::WRITE_STR`]).
    fn write_str(&mut self, _s: &str) -> Result<usize, FsError> {
        Err(FsError::NotSupported { operation: "write_str" })
    }

    /// Resize ([`FileCapabilities::SET_LEN`]).
    fn set_len(&mut self, _size: u64) -> Result<(), FsError> {
        Err(FsError::NotSupported { operation: "set_len" })
    }

    /// Entry names ([`FileCapabilities::READ_DIR_NAMES`]).
    fn read_dir_names(&mut self, _count: usize) -> Result<Vec<String>, FsError> {
        Err(FsError::NotSupported {
            operation: "read_dir_names",
        })
    }
}

impl<T: UnseekableFile + ?Sized> UnseekableFile for Box<T> {
    fn name(&self) -> &Path {
        (**self).name()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, FsError> {
        (**self).read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, FsError> {
        (**self).write(buf)
    }

    fn close(&mut self) -> Result<(), FsError> {
        (**self).close()
    }

    fn sync(&mut self) -> Result<(), FsError> {
        (**self).sync()
    }

    fn stat(&self) -> Result<Metadata, FsError> {
        (**self).stat()
    }

    fn read_dir(&mut self, count: usize) -> Result<Vec<Metadata>, FsError> {
        (**self).read_dir(count)
    }
}

impl<T: SeekableFile + ?Sized> SeekableFile for Box<T> {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, FsError> {
        (**self).seek(pos)
    }

    fn native_ops(&mut self) -> Option<&mut dyn NativeFileOps> {
        (**self).native_ops()
    }
}

impl<T: File + ?Sized> File for Box<T> {
    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> Result<usize, FsError> {
        (**self).read_at(buf, offset)
    }

    fn write_at(&mut self, buf: &[u8], offset: u64) -> Result<usize, FsError> {
        (**self).write_at(buf, offset)
    }

    fn write_str(&mut self, s: &str) -> Result<usize, FsError> {
        (**self).write_str(s)
    }

    fn set_len(&mut self, size: u64) -> Result<(), FsError> {
        (**self).set_len(size)
    }

    fn read_dir_names(&mut self, count: usize) -> Result<Vec<String>, FsError> {
        (**self).read_dir_names(count)
    }
}
