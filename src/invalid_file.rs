//! A placeholder handle that refuses every operation.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use crate::{File, FsError, Metadata, SeekableFile, UnseekableFile};

/// A file handle that is never usable.
///
/// Stands in where a handle is required but none could be opened. Every I/O
/// method returns [`FsError::BadHandle`] naming the path and the attempted
/// operation; [`close`](UnseekableFile::close) succeeds so cleanup paths stay
/// quiet.
///
/// # Example
///
/// ```rust
/// use anyfs_extend::{FsError, InvalidFile, UnseekableFile};
///
/// let mut file = InvalidFile::new("/lost");
/// let mut buf = [0u8; 4];
/// assert!(matches!(file.read(&mut buf), Err(FsError::BadHandle { operation: "read", .. })));
/// assert!(file.close().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidFile {
    path: PathBuf,
}

impl InvalidFile {
    /// Create a placeholder for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn refuse<T>(&self, operation: &'static str) -> Result<T, FsError> {
        Err(FsError::BadHandle {
            path: self.path.clone(),
            operation,
        })
    }
}

impl UnseekableFile for InvalidFile {
    fn name(&self) -> &Path {
        &self.path
    }

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, FsError> {
        self.refuse("read")
    }

    fn write(&mut self, _buf: &[u8]) -> Result<usize, FsError> {
        self.refuse("write")
    }

    fn close(&mut self) -> Result<(), FsError> {
        Ok(())
    }

    fn sync(&mut self) -> Result<(), FsError> {
        self.refuse("sync")
    }

    fn stat(&self) -> Result<Metadata, FsError> {
        self.refuse("stat")
    }

    fn read_dir(&mut self, _count: usize) -> Result<Vec<Metadata>, FsError> {
        self.refuse("read_dir")
    }
}

impl SeekableFile for InvalidFile {
    fn seek(&mut self, _pos: SeekFrom) -> Result<u64, FsError> {
        self.refuse("seek")
    }
}

impl File for InvalidFile {
    fn read_at(&mut self, _buf: &mut [u8], _offset: u64) -> Result<usize, FsError> {
        self.refuse("read_at")
    }

    fn write_at(&mut self, _buf: &[u8], _offset: u64) -> Result<usize, FsError> {
        self.refuse("write_at")
    }

    fn write_str(&mut self, _s: &str) -> Result<usize, FsError> {
        self.refuse("write_str")
    }

    fn set_len(&mut self, _size: u64) -> Result<(), FsError> {
        self.refuse("set_len")
    }

    fn read_dir_names(&mut self, _count: usize) -> Result<Vec<String>, FsError> {
        self.refuse("read_dir_names")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operation(err: FsError) -> &'static str {
        match err {
            FsError::BadHandle { operation, path } => {
                assert_eq!(path, PathBuf::from("/gone"));
                operation
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn every_operation_is_refused() {
        let mut file = InvalidFile::new("/gone");
        let mut buf = [0u8; 1];

        assert_eq!(operation(file.read(&mut buf).unwrap_err()), "read");
        assert_eq!(operation(file.write(b"x").unwrap_err()), "write");
        assert_eq!(operation(file.sync().unwrap_err()), "sync");
        assert_eq!(operation(file.stat().unwrap_err()), "stat");
        assert_eq!(operation(file.read_dir(0).unwrap_err()), "read_dir");
        assert_eq!(operation(file.seek(SeekFrom::Start(0)).unwrap_err()), "seek");
        assert_eq!(operation(file.read_at(&mut buf, 0).unwrap_err()), "read_at");
        assert_eq!(operation(file.write_at(b"x", 0).unwrap_err()), "write_at");
        assert_eq!(operation(file.write_str("x").unwrap_err()), "write_str");
        assert_eq!(operation(file.set_len(0).unwrap_err()), "set_len");
        assert_eq!(
            operation(file.read_dir_names(0).unwrap_err()),
            "read_dir_names"
        );
    }

    #[test]
    fn close_succeeds_and_name_is_kept() {
        let mut file = InvalidFile::new("/gone");
        assert!(file.close().is_ok());
        assert_eq!(file.name(), Path::new("/gone"));
    }
}
