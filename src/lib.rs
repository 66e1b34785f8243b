//! # anyfs-extend
//!
//! Upgrade any **minimal filer** into a complete virtual filesystem.
//!
//! A backend implements eight operations ([`Filer`]). [`ExtendedFs`] adds the
//! rest: working-directory navigation with relative-path resolution,
//! convenience `open`/`create`, recursive `mkdir_all`/`remove_all`, and
//! `truncate` by path. Backends that can do better advertise native versions
//! through [`NativeOps`]; those are used instead of the generic ones.
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust
//! use anyfs_extend::{FileMode, FileSystem, FileSystemExt, Filer, FilerExt, FsError};
//! use std::path::Path;
//!
//! fn publish<F: Filer>(backend: F) -> Result<(), FsError> {
//!     let mut fs = backend.extend();
//!
//!     fs.mkdir_all(Path::new("/site/assets"), FileMode::DEFAULT_DIR)?;
//!     fs.chdir(Path::new("/site"))?;
//!     fs.write_file(Path::new("index.html"), b"<h1>hi</h1>")?;
//!     fs.truncate(Path::new("index.html"), 4)?;
//!
//!     fs.remove_all(Path::new("/site"))
//! }
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Filer`] | The eight operations every backend implements |
//! | [`NativeOps`] | Optional optimized operations, advertised by [`Capabilities`] |
//! | [`FileSystem`] | The complete filesystem contract |
//! | [`ExtendedFs`] | Builds a [`FileSystem`] from any [`Filer`] |
//! | [`SymLinker`] | Symbolic links, orthogonal to the rest |
//! | [`File`] | A fully featured open handle |
//! | [`FsError`] | Error type with path and operation context |
//! | [`Metadata`] | Snapshot of name, size, mode and modification time |
//! | [`FileMode`] / [`OpenFlags`] | Permission/type bits and open flags |
//!
//! ---
//!
//! ## Capability Dispatch
//!
//! ```text
//! ExtendedFs::new(filer)
//!   └─ filer.native_ops()?.capabilities()   (read once)
//!
//! fs.mkdir_all(path)
//!   ├─ path = resolve(path)
//!   ├─ MKDIR_ALL advertised ─▶ native.mkdir_all(path)
//!   └─ otherwise            ─▶ filer.mkdir() per component
//! ```
//!
//! The same rule applies to file handles: [`extend_seekable`] upgrades a
//! [`SeekableFile`] to [`File`] using whatever [`NativeFileOps`] it
//! advertises, and [`extend_unseekable`] buffers a plain stream in memory.
//!
//! ---
//!
//! ## Path Resolution
//!
//! Relative paths are joined onto the wrapper's working directory and cleaned.
//! Paths starting with `/` or `\` count as absolute on every host, so virtual
//! backends can use one separator convention everywhere. See [`PathResolver`].
//!
//! ---
//!
//! ## Error Handling
//!
//! All operations return `Result<T, FsError>`. Errors include context:
//!
//! ```rust
//! use anyfs_extend::FsError;
//! use std::path::PathBuf;
//!
//! let err = FsError::NotADirectory {
//!     path: PathBuf::from("/f.txt"),
//!     operation: "chdir",
//! };
//! assert_eq!(err.to_string(), "chdir: not a directory: /f.txt");
//! ```
//!
//! When cleanup fails after an operation already failed (closing a handle,
//! say), the first error is the one reported.
//!
//! Handles implement `std::io::Read`, `Write` and (when seekable) `Seek`, so
//! they plug into `std::io::copy` and `BufReader`. An [`FsError`] crossing into
//! `std::io::Error` keeps its kind and converts back unchanged.
//!
//! ---
//!
//! ## Thread Safety
//!
//! No locking happens in this crate. [`FileSystem::chdir`] takes `&mut self`,
//! so a wrapper's working directory cannot change under a concurrent
//! resolution. To share one backend, hand each thread its own wrapper over an
//! `Arc<B>` (or `&B`); [`Filer`] is implemented for both.
//!
//! ---
//!
//! ## Logging
//!
//! Operations emit [`tracing`] events: `debug` for construction, working
//! directory changes and the generic recursive algorithms; `trace` for path
//! resolution and individual removals. Install a subscriber to see them.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialization for [`Metadata`], [`FileMode`], [`OpenFlags`], [`Capabilities`]; JSON helpers |

// Private modules
mod capabilities;
mod error;
mod ext;
mod extend;
mod file_adapter;
mod flags;
mod invalid_file;
mod mode;
mod path_resolver;
mod std_io;
mod traits;
mod types;

// Public re-exports - error types
pub use error::{FsError, ParseError};

// Public re-exports - core types
pub use capabilities::{Capabilities, FileCapabilities};
pub use flags::{AccessMode, OpenFlags};
pub use mode::FileMode;
pub use types::Metadata;

// Public re-exports - contracts
pub use traits::{
    File, FileSystem, Filer, NativeFileOps, NativeOps, SeekableFile, SymLinker,
    SymlinkFileSystem, UnseekableFile,
};

// Public re-exports - path resolution
pub use path_resolver::{PathResolver, clean, is_absolute, is_virtual_absolute};

// Public re-exports - adapters
pub use extend::{ExtendedFs, FilerExt, extend_filer};
pub use file_adapter::{FileAdapter, SeekBuffer, extend_seekable, extend_unseekable};
pub use invalid_file::InvalidFile;

// Public re-exports - infrastructure
pub use ext::FileSystemExt;

// Conditional re-exports
#[cfg(feature = "serde")]
pub use ext::FileSystemExtJson;
