//! # Handle Adapters
//!
//! Upgrade lower-tier handles to the full [`File`] interface.
//!
//! | Adapter | Input | Strategy |
//! |---------|-------|----------|
//! | [`SeekBuffer`] | [`UnseekableFile`] | drain into memory, write back on sync/close |
//! | [`FileAdapter`] | [`SeekableFile`] | native [`NativeFileOps`] first, otherwise built from `seek` |
//!
//! The adapters follow the same rule as [`ExtendedFs`](crate::ExtendedFs):
//! what a handle advertises natively is used as is, the rest is synthesized.

use std::io::{self, SeekFrom};
use std::path::Path;

use tracing::{debug, trace};

use crate::error::keep_first;
use crate::{
    File, FileCapabilities, FsError, Metadata, NativeFileOps, SeekableFile, UnseekableFile,
};

fn to_index(path: &Path, offset: u64, operation: &'static str) -> Result<usize, FsError> {
    usize::try_from(offset).map_err(|_| FsError::InvalidArgument {
        path: path.to_path_buf(),
        operation,
        reason: format!("offset {offset} exceeds addressable memory"),
    })
}

// ============================================================================
// SeekBuffer
// ============================================================================

/// An [`UnseekableFile`] held entirely in memory.
///
/// Built by [`extend_unseekable`]. Reads, writes and seeks work on the
/// buffer; [`sync`](UnseekableFile::sync) and [`close`](UnseekableFile::close)
/// hand the whole buffer to the underlying stream in a single `write`.
///
/// The underlying stream must accept the full buffer in one call. A stream
/// that accepts fewer bytes makes `sync` and `close` fail with
/// [`FsError::ShortWrite`].
#[derive(Debug)]
pub struct SeekBuffer<U> {
    inner: U,
    data: Vec<u8>,
    offset: usize,
}

/// Read `file` to the end and wrap it into a [`SeekBuffer`].
///
/// # Errors
///
/// Any read error. The stream is closed before the error is returned.
///
/// # Example
///
/// ```rust
/// use anyfs_extend::{extend_unseekable, FsError, SeekableFile, UnseekableFile};
/// use std::io::SeekFrom;
///
/// fn patch_header<U: UnseekableFile>(stream: U) -> Result<(), FsError> {
///     let mut file = extend_unseekable(stream)?;
///     file.seek(SeekFrom::Start(0))?;
///     file.write(b"v2")?;
///     file.close()
/// }
/// ```
pub fn extend_unseekable<U: UnseekableFile>(mut file: U) -> Result<SeekBuffer<U>, FsError> {
    let mut data = Vec::new();
    let stream: &mut dyn UnseekableFile = &mut file;
    if let Err(e) = io::Read::read_to_end(stream, &mut data) {
        let drained = Err(FsError::from_io(e, "read", file.name()));
        return keep_first(drained, file.close());
    }
    debug!(path = %file.name().display(), len = data.len(), "buffered stream");
    Ok(SeekBuffer {
        inner: file,
        data,
        offset: 0,
    })
}

impl<U: UnseekableFile> SeekBuffer<U> {
    /// The buffered contents.
    pub fn contents(&self) -> &[u8] {
        &self.data
    }

    /// Unwrap, returning the stream. Unsynced changes are discarded.
    pub fn into_inner(self) -> U {
        self.inner
    }

    fn copy_out(&self, buf: &mut [u8], at: usize) -> usize {
        if at >= self.data.len() {
            return 0;
        }
        let n = buf.len().min(self.data.len() - at);
        buf[..n].copy_from_slice(&self.data[at..at + n]);
        n
    }

    fn copy_in(
        &mut self,
        buf: &[u8],
        at: usize,
        operation: &'static str,
    ) -> Result<usize, FsError> {
        let end = at.checked_add(buf.len()).ok_or_else(|| FsError::InvalidArgument {
            path: self.inner.name().to_path_buf(),
            operation,
            reason: format!("writing {} bytes at offset {at} overflows", buf.len()),
        })?;
        if end > self.data.len() {
            self.grow_to(end, operation)?;
        }
        self.data[at..end].copy_from_slice(buf);
        Ok(buf.len())
    }

    /// Zero-extend the buffer to `len` bytes.
    fn grow_to(&mut self, len: usize, operation: &'static str) -> Result<(), FsError> {
        let additional = len - self.data.len();
        self.data
            .try_reserve(additional)
            .map_err(|e| FsError::InvalidArgument {
                path: self.inner.name().to_path_buf(),
                operation,
                reason: format!("cannot grow buffer to {len} bytes: {e}"),
            })?;
        self.data.resize(len, 0);
        Ok(())
    }
}

impl<U: UnseekableFile> UnseekableFile for SeekBuffer<U> {
    fn name(&self) -> &Path {
        self.inner.name()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, FsError> {
        let n = self.copy_out(buf, self.offset);
        self.offset += n;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, FsError> {
        let n = self.copy_in(buf, self.offset, "write")?;
        self.offset += n;
        Ok(n)
    }

    fn close(&mut self) -> Result<(), FsError> {
        let synced = self.sync();
        keep_first(synced, self.inner.close())
    }

    fn sync(&mut self) -> Result<(), FsError> {
        let written = self.inner.write(&self.data)?;
        if written != self.data.len() {
            return Err(FsError::ShortWrite {
                path: self.inner.name().to_path_buf(),
                written,
                expected: self.data.len(),
            });
        }
        trace!(path = %self.inner.name().display(), len = written, "flushed buffer");
        self.inner.sync()
    }

    fn stat(&self) -> Result<Metadata, FsError> {
        let mut meta = self.inner.stat()?;
        meta.size = self.data.len() as u64;
        Ok(meta)
    }

    fn read_dir(&mut self, count: usize) -> Result<Vec<Metadata>, FsError> {
        self.inner.read_dir(count)
    }
}

impl<U: UnseekableFile> SeekableFile for SeekBuffer<U> {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, FsError> {
        let (base, delta) = match pos {
            SeekFrom::Start(n) => (0i128, i128::from(n)),
            SeekFrom::Current(n) => (self.offset as i128, i128::from(n)),
            SeekFrom::End(n) => (self.data.len() as i128, i128::from(n)),
        };
        let target = base + delta;
        let offset = usize::try_from(target).map_err(|_| FsError::InvalidArgument {
            path: self.inner.name().to_path_buf(),
            operation: "seek",
            reason: format!("position {target} out of range"),
        })?;
        self.offset = offset;
        Ok(offset as u64)
    }

    fn native_ops(&mut self) -> Option<&mut dyn NativeFileOps> {
        Some(self)
    }
}

impl<U: UnseekableFile> NativeFileOps for SeekBuffer<U> {
    fn capabilities(&self) -> FileCapabilities {
        FileCapabilities::all()
    }

    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> Result<usize, FsError> {
        let at = to_index(self.inner.name(), offset, "read_at")?;
        Ok(self.copy_out(buf, at))
    }

    fn write_at(&mut self, buf: &[u8], offset: u64) -> Result<usize, FsError> {
        let at = to_index(self.inner.name(), offset, "write_at")?;
        self.copy_in(buf, at, "write_at")
    }

    fn write_str(&mut self, s: &str) -> Result<usize, FsError> {
        UnseekableFile::write(self, s.as_bytes())
    }

    fn set_len(&mut self, size: u64) -> Result<(), FsError> {
        let len = to_index(self.inner.name(), size, "set_len")?;
        if len > self.data.len() {
            self.grow_to(len, "set_len")
        } else {
            self.data.truncate(len);
            Ok(())
        }
    }

    fn read_dir_names(&mut self, count: usize) -> Result<Vec<String>, FsError> {
        Ok(self
            .inner
            .read_dir(count)?
            .into_iter()
            .map(|entry| entry.name)
            .collect())
    }
}

impl<U: UnseekableFile> File for SeekBuffer<U> {
    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> Result<usize, FsError> {
        NativeFileOps::read_at(self, buf, offset)
    }

    fn write_at(&mut self, buf: &[u8], offset: u64) -> Result<usize, FsError> {
        NativeFileOps::write_at(self, buf, offset)
    }

    fn write_str(&mut self, s: &str) -> Result<usize, FsError> {
        NativeFileOps::write_str(self, s)
    }

    fn set_len(&mut self, size: u64) -> Result<(), FsError> {
        NativeFileOps::set_len(self, size)
    }

    fn read_dir_names(&mut self, count: usize) -> Result<Vec<String>, FsError> {
        NativeFileOps::read_dir_names(self, count)
    }
}

// ============================================================================
// FileAdapter
// ============================================================================

/// A [`SeekableFile`] upgraded to [`File`].
///
/// Built by [`extend_seekable`]. Operations the handle advertises through
/// [`SeekableFile::native_ops`] are forwarded; the rest are built from
/// `seek`, `read`, `write` and `read_dir`:
///
/// | Operation | Generic version |
/// |-----------|-----------------|
/// | `read_at` / `write_at` | seek, read or write, seek back |
/// | `write_str` | `write` of the string's bytes |
/// | `set_len` | grow by appending zeros; shrinking is not supported |
/// | `read_dir_names` | names taken from `read_dir` |
#[derive(Debug)]
pub struct FileAdapter<S> {
    inner: S,
    caps: FileCapabilities,
}

/// Wrap `file` into a [`FileAdapter`], reading its native capabilities once.
pub fn extend_seekable<S: SeekableFile>(mut file: S) -> FileAdapter<S> {
    let caps = file
        .native_ops()
        .map(|native| native.capabilities())
        .unwrap_or_default();
    debug!(path = %file.name().display(), capabilities = ?caps, "extending handle");
    FileAdapter { inner: file, caps }
}

impl<S: SeekableFile> FileAdapter<S> {
    /// The native operations found at construction.
    #[inline]
    pub fn capabilities(&self) -> FileCapabilities {
        self.caps
    }

    /// Unwrap, returning the handle.
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn native(&mut self, cap: FileCapabilities) -> Option<&mut dyn NativeFileOps> {
        if self.caps.contains(cap) {
            self.inner.native_ops()
        } else {
            None
        }
    }

    /// Run `op` at `offset`, restoring the current position afterwards.
    fn at_offset<T>(
        &mut self,
        offset: u64,
        op: impl FnOnce(&mut S) -> Result<T, FsError>,
    ) -> Result<T, FsError> {
        let saved = self.inner.seek(SeekFrom::Current(0))?;
        self.inner.seek(SeekFrom::Start(offset))?;
        let result = op(&mut self.inner);
        let restored = self.inner.seek(SeekFrom::Start(saved)).map(|_| ());
        keep_first(result, restored)
    }
}

impl<S: SeekableFile> UnseekableFile for FileAdapter<S> {
    fn name(&self) -> &Path {
        self.inner.name()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, FsError> {
        self.inner.read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, FsError> {
        self.inner.write(buf)
    }

    fn close(&mut self) -> Result<(), FsError> {
        self.inner.close()
    }

    fn sync(&mut self) -> Result<(), FsError> {
        self.inner.sync()
    }

    fn stat(&self) -> Result<Metadata, FsError> {
        self.inner.stat()
    }

    fn read_dir(&mut self, count: usize) -> Result<Vec<Metadata>, FsError> {
        self.inner.read_dir(count)
    }
}

impl<S: SeekableFile> SeekableFile for FileAdapter<S> {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, FsError> {
        self.inner.seek(pos)
    }

    fn native_ops(&mut self) -> Option<&mut dyn NativeFileOps> {
        self.inner.native_ops()
    }
}

impl<S: SeekableFile> File for FileAdapter<S> {
    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> Result<usize, FsError> {
        if let Some(native) = self.native(FileCapabilities::POSITIONAL) {
            return native.read_at(buf, offset);
        }
        self.at_offset(offset, |inner| inner.read(buf))
    }

    fn write_at(&mut self, buf: &[u8], offset: u64) -> Result<usize, FsError> {
        if let Some(native) = self.native(FileCapabilities::POSITIONAL) {
            return native.write_at(buf, offset);
        }
        self.at_offset(offset, |inner| inner.write(buf))
    }

    fn write_str(&mut self, s: &str) -> Result<usize, FsError> {
        if let Some(native) = self.native(FileCapabilities::WRITE_STR) {
            return native.write_str(s);
        }
        self.inner.write(s.as_bytes())
    }

    fn set_len(&mut self, size: u64) -> Result<(), FsError> {
        if let Some(native) = self.native(FileCapabilities::SET_LEN) {
            return native.set_len(size);
        }

        let saved = self.inner.seek(SeekFrom::Current(0))?;
        let len = self.inner.seek(SeekFrom::End(0))?;
        let resized = if size < len {
            Err(FsError::NotSupported {
                operation: "set_len",
            })
        } else {
            let inner: &mut dyn UnseekableFile = &mut self.inner;
            let mut zeros = io::Read::take(io::repeat(0), size - len);
            io::copy(&mut zeros, inner)
                .map(drop)
                .map_err(|e| FsError::from_io(e, "set_len", self.inner.name()))
        };
        let restored = self.inner.seek(SeekFrom::Start(saved)).map(|_| ());
        keep_first(resized, restored)
    }

    fn read_dir_names(&mut self, count: usize) -> Result<Vec<String>, FsError> {
        if let Some(native) = self.native(FileCapabilities::READ_DIR_NAMES) {
            return native.read_dir_names(count);
        }
        Ok(self
            .inner
            .read_dir(count)?
            .into_iter()
            .map(|entry| entry.name)
            .collect())
    }
}
