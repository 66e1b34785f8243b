//! Error types for the extended filesystem.

use std::path::{Path, PathBuf};

/// Filesystem error type with contextual variants.
///
/// Variants carry the offending path and the operation that failed where
/// applicable, so callers can match on the category (`NotFound` vs.
/// `NotADirectory`, ...) and still report something useful.
///
/// # Examples
///
/// ```rust
/// use anyfs_extend::FsError;
/// use std::path::PathBuf;
///
/// let err = FsError::NotFound { path: PathBuf::from("/missing") };
/// assert!(err.to_string().contains("/missing"));
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// Path does not exist.
    #[error("not found: {path}")]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Path already exists when it shouldn't.
    #[error("{operation}: already exists: {path}")]
    AlreadyExists {
        /// The path that already exists.
        path: PathBuf,
        /// The operation that failed.
        operation: &'static str,
    },

    /// Expected a directory but found something else.
    #[error("{operation}: not a directory: {path}")]
    NotADirectory {
        /// The path that is not a directory.
        path: PathBuf,
        /// The operation that failed.
        operation: &'static str,
    },

    /// Expected a file but found a directory.
    #[error("{operation}: is a directory: {path}")]
    IsADirectory {
        /// The path that is a directory.
        path: PathBuf,
        /// The operation that failed.
        operation: &'static str,
    },

    /// Directory is not empty when it should be.
    #[error("directory not empty: {path}")]
    DirectoryNotEmpty {
        /// The path to the non-empty directory.
        path: PathBuf,
    },

    /// Permission denied for operation.
    #[error("{operation}: permission denied: {path}")]
    PermissionDenied {
        /// The path where permission was denied.
        path: PathBuf,
        /// The operation that was denied.
        operation: &'static str,
    },

    /// An argument was rejected (negative seek offset, bad flags, ...).
    #[error("{operation}: invalid argument: {path} ({reason})")]
    InvalidArgument {
        /// The path the operation was applied to.
        path: PathBuf,
        /// The operation that failed.
        operation: &'static str,
        /// Why the argument was rejected.
        reason: String,
    },

    /// The file handle is not usable (never opened, or already failed).
    #[error("{operation}: bad file handle: {path}")]
    BadHandle {
        /// The path the handle was opened for.
        path: PathBuf,
        /// The operation attempted on the handle.
        operation: &'static str,
    },

    /// Operation is not supported by the backend or handle.
    #[error("operation not supported: {operation}")]
    NotSupported {
        /// The unsupported operation.
        operation: &'static str,
    },

    /// The underlying handle accepted fewer bytes than it was given.
    #[error("short write to {path}: wrote {written} of {expected} bytes")]
    ShortWrite {
        /// The path of the handle being written.
        path: PathBuf,
        /// Bytes accepted by the handle.
        written: usize,
        /// Bytes that should have been accepted.
        expected: usize,
    },

    /// Generic backend error.
    #[error("backend error: {0}")]
    Backend(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// I/O error with context.
    #[error("{operation} failed for {path}: {source}")]
    Io {
        /// The operation that failed.
        operation: &'static str,
        /// The path involved in the operation.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Convert an I/O error met while performing `operation` on `path`.
    ///
    /// An `FsError` carried inside the I/O error is returned as is.
    pub(crate) fn from_io(error: std::io::Error, operation: &'static str, path: &Path) -> Self {
        match Self::unwrap_io(error) {
            Ok(inner) => inner,
            Err(source) => FsError::Io {
                operation,
                path: path.to_path_buf(),
                source,
            },
        }
    }

    fn unwrap_io(error: std::io::Error) -> Result<Self, std::io::Error> {
        if !error.get_ref().is_some_and(|inner| inner.is::<FsError>()) {
            return Err(error);
        }
        let kind = error.kind();
        match error.into_inner().map(|inner| inner.downcast::<FsError>()) {
            Some(Ok(inner)) => Ok(*inner),
            Some(Err(other)) => Err(std::io::Error::new(kind, other)),
            None => Err(std::io::Error::from(kind)),
        }
    }
}

impl From<FsError> for std::io::Error {
    fn from(error: FsError) -> Self {
        use std::io::ErrorKind;

        let kind = match &error {
            FsError::NotFound { .. } => ErrorKind::NotFound,
            FsError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            FsError::NotADirectory { .. } => ErrorKind::NotADirectory,
            FsError::IsADirectory { .. } => ErrorKind::IsADirectory,
            FsError::DirectoryNotEmpty { .. } => ErrorKind::DirectoryNotEmpty,
            FsError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            FsError::InvalidArgument { .. } => ErrorKind::InvalidInput,
            FsError::NotSupported { .. } => ErrorKind::Unsupported,
            FsError::ShortWrite { .. } => ErrorKind::WriteZero,
            FsError::Io { source, .. } => source.kind(),
            _ => ErrorKind::Other,
        };
        std::io::Error::new(kind, error)
    }
}

impl From<std::io::Error> for FsError {
    fn from(error: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let error = match Self::unwrap_io(error) {
            Ok(inner) => return inner,
            Err(error) => error,
        };
        match error.kind() {
            ErrorKind::NotFound => FsError::NotFound {
                path: PathBuf::new(),
            },
            ErrorKind::PermissionDenied => FsError::PermissionDenied {
                path: PathBuf::new(),
                operation: "io",
            },
            ErrorKind::AlreadyExists => FsError::AlreadyExists {
                path: PathBuf::new(),
                operation: "io",
            },
            ErrorKind::NotADirectory => FsError::NotADirectory {
                path: PathBuf::new(),
                operation: "io",
            },
            ErrorKind::IsADirectory => FsError::IsADirectory {
                path: PathBuf::new(),
                operation: "io",
            },
            ErrorKind::DirectoryNotEmpty => FsError::DirectoryNotEmpty {
                path: PathBuf::new(),
            },
            ErrorKind::InvalidInput => FsError::InvalidArgument {
                path: PathBuf::new(),
                operation: "io",
                reason: error.to_string(),
            },
            _ => FsError::Io {
                operation: "io",
                path: PathBuf::new(),
                source: error,
            },
        }
    }
}

/// Errors from parsing file mode and open flag strings.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A mode string must be one type character followed by nine permission characters.
    #[error("file mode {input:?} has length {len}, expected 10")]
    ModeLength {
        /// The rejected input.
        input: String,
        /// Its length in characters.
        len: usize,
    },

    /// The leading type character is not one of `-dalTLDpSugct`.
    #[error("file mode {input:?}: unrecognized type character {found:?}")]
    ModeType {
        /// The rejected input.
        input: String,
        /// The offending character.
        found: char,
    },

    /// A permission character does not match its slot.
    #[error("file mode {input:?}: unexpected character {found:?} at {position}")]
    ModePermission {
        /// The rejected input.
        input: String,
        /// The offending character.
        found: char,
        /// Character index within the input.
        position: usize,
    },

    /// More than one of `O_RDONLY`, `O_WRONLY`, `O_RDWR` was given.
    #[error("multiple access modes {first:?}, {second:?}")]
    MultipleAccessModes {
        /// The access mode seen first.
        first: String,
        /// The conflicting access mode.
        second: String,
    },

    /// A flag name was not recognized.
    #[error("unrecognized flag {0:?}")]
    UnknownFlag(String),
}

/// Merge a cleanup result into a primary result: the first error wins.
///
/// The cleanup has already run by the time this is called; its error is only
/// reported when the primary operation succeeded.
pub(crate) fn keep_first<T>(
    primary: Result<T, FsError>,
    cleanup: Result<(), FsError>,
) -> Result<T, FsError> {
    match (primary, cleanup) {
        (Err(e), _) => Err(e),
        (Ok(_), Err(e)) => Err(e),
        (Ok(value), Ok(())) => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_error_not_found_display() {
        let err = FsError::NotFound {
            path: PathBuf::from("/missing"),
        };
        assert_eq!(err.to_string(), "not found: /missing");
    }

    #[test]
    fn fs_error_not_a_directory_display() {
        let err = FsError::NotADirectory {
            path: PathBuf::from("/f.txt"),
            operation: "chdir",
        };
        assert_eq!(err.to_string(), "chdir: not a directory: /f.txt");
    }

    #[test]
    fn fs_error_short_write_display() {
        let err = FsError::ShortWrite {
            path: PathBuf::from("/log"),
            written: 3,
            expected: 8,
        };
        assert_eq!(err.to_string(), "short write to /log: wrote 3 of 8 bytes");
    }

    #[test]
    fn fs_error_from_io_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        assert!(matches!(FsError::from(io_err), FsError::NotFound { .. }));
    }

    #[test]
    fn fs_error_from_io_already_exists() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AlreadyExists, "test");
        assert!(matches!(
            FsError::from(io_err),
            FsError::AlreadyExists { .. }
        ));
    }

    #[test]
    fn fs_error_from_io_invalid_input() {
        let io_err = std::io::Error::new(std::io::ErrorKind::InvalidInput, "bad");
        match FsError::from(io_err) {
            FsError::InvalidArgument { reason, .. } => assert!(reason.contains("bad")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn fs_error_from_io_other() {
        let io_err = std::io::Error::other("test");
        assert!(matches!(FsError::from(io_err), FsError::Io { .. }));
    }

    #[test]
    fn fs_error_into_io_keeps_kind_and_payload() {
        let io_err = std::io::Error::from(FsError::NotFound {
            path: PathBuf::from("/gone"),
        });
        assert_eq!(io_err.kind(), std::io::ErrorKind::NotFound);
        match FsError::from(io_err) {
            FsError::NotFound { path } => assert_eq!(path, PathBuf::from("/gone")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn fs_error_short_write_maps_to_write_zero() {
        let io_err = std::io::Error::from(FsError::ShortWrite {
            path: PathBuf::from("/log"),
            written: 1,
            expected: 2,
        });
        assert_eq!(io_err.kind(), std::io::ErrorKind::WriteZero);
    }

    #[test]
    fn from_io_adds_context_to_plain_errors() {
        let io_err = std::io::Error::new(std::io::ErrorKind::WriteZero, "stalled");
        match FsError::from_io(io_err, "write_file", Path::new("/out")) {
            FsError::Io {
                operation, path, ..
            } => {
                assert_eq!(operation, "write_file");
                assert_eq!(path, PathBuf::from("/out"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn from_io_returns_embedded_fs_error() {
        let io_err = std::io::Error::from(FsError::BadHandle {
            path: PathBuf::from("/h"),
            operation: "read",
        });
        assert!(matches!(
            FsError::from_io(io_err, "read_file", Path::new("/h")),
            FsError::BadHandle { operation: "read", .. }
        ));
    }

    #[test]
    fn keep_first_prefers_primary_error() {
        let primary: Result<(), FsError> = Err(FsError::NotSupported { operation: "a" });
        let cleanup = Err(FsError::NotSupported { operation: "b" });
        match keep_first(primary, cleanup) {
            Err(FsError::NotSupported { operation }) => assert_eq!(operation, "a"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn keep_first_reports_cleanup_error_after_success() {
        let cleanup = Err(FsError::Backend("close".into()));
        assert!(matches!(keep_first(Ok(7), cleanup), Err(FsError::Backend(_))));
    }

    #[test]
    fn keep_first_passes_value_through() {
        assert_eq!(keep_first(Ok(7), Ok(())).unwrap(), 7);
    }
}
