//! # `std::io` Views of Handles
//!
//! Every handle trait object and both adapters implement [`io::Read`] and
//! [`io::Write`]; the seekable ones also implement [`io::Seek`]. Handles
//! returned by [`FileSystem::open`](crate::FileSystem::open) therefore work
//! with `std::io::copy`, `BufReader` and `read_to_end`:
//!
//! ```rust
//! use anyfs_extend::{FileSystem, FsError};
//! use std::io::{BufRead, BufReader};
//! use std::path::Path;
//!
//! fn count_lines<F: FileSystem>(fs: &F) -> Result<usize, FsError> {
//!     let file = fs.open(Path::new("/var/log/app.log"))?;
//!     Ok(BufReader::new(file).lines().count())
//! }
//! ```
//!
//! Errors cross the boundary as [`io::Error`] with the matching
//! [`io::ErrorKind`]; the original [`FsError`] rides along as the payload and
//! comes back out through `From<io::Error> for FsError`. `flush` is
//! [`UnseekableFile::sync`].

use std::io::{self, SeekFrom};
use std::path::Path;

use crate::file_adapter::{FileAdapter, SeekBuffer};
use crate::{File, FsError, SeekableFile, UnseekableFile};

fn overreported(path: &Path, operation: &'static str, n: usize, len: usize) -> FsError {
    FsError::InvalidArgument {
        path: path.to_path_buf(),
        operation,
        reason: format!("handle reported {n} bytes for a {len} byte buffer"),
    }
}

/// A single `read`, refusing a count larger than the buffer.
fn checked_read<R>(file: &mut R, buf: &mut [u8]) -> Result<usize, FsError>
where
    R: UnseekableFile + ?Sized,
{
    let n = file.read(buf)?;
    if n > buf.len() {
        return Err(overreported(file.name(), "read", n, buf.len()));
    }
    Ok(n)
}

/// A single `write`, refusing a count larger than the buffer.
fn checked_write<W>(file: &mut W, buf: &[u8]) -> Result<usize, FsError>
where
    W: UnseekableFile + ?Sized,
{
    let n = file.write(buf)?;
    if n > buf.len() {
        return Err(overreported(file.name(), "write", n, buf.len()));
    }
    Ok(n)
}

macro_rules! std_read_write {
    ($([$($generics:tt)*] $ty:ty;)*) => {$(
        impl<$($generics)*> io::Read for $ty {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                Ok(checked_read(self, buf)?)
            }
        }

        impl<$($generics)*> io::Write for $ty {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                Ok(checked_write(self, buf)?)
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(UnseekableFile::sync(self)?)
            }
        }
    )*};
}

macro_rules! std_seek {
    ($([$($generics:tt)*] $ty:ty;)*) => {$(
        impl<$($generics)*> io::Seek for $ty {
            fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
                Ok(SeekableFile::seek(self, pos)?)
            }
        }
    )*};
}

std_read_write! {
    [] dyn UnseekableFile + '_;
    [] dyn SeekableFile + '_;
    [] dyn File + '_;
    [U: UnseekableFile] SeekBuffer<U>;
    [S: SeekableFile] FileAdapter<S>;
}

std_seek! {
    [] dyn SeekableFile + '_;
    [] dyn File + '_;
    [U: UnseekableFile] SeekBuffer<U>;
    [S: SeekableFile] FileAdapter<S>;
}
