//! # Filesystem Traits
//!
//! The capability contracts this crate is built around.
//!
//! ## Layers
//!
//! ```text
//! Filer (8 required operations)  ──ExtendedFs::new──▶  FileSystem
//!   + NativeOps (optional)                                 + SymLinker = SymlinkFileSystem
//! ```
//!
//! ## Quick Reference
//!
//! | Trait | Role | Who implements it |
//! |-------|------|-------------------|
//! | [`Filer`] | open, mkdir, remove, rename, stat, chmod, chtimes, chown | every backend |
//! | [`NativeOps`] | optimized versions of the extended operations | backends that can do better |
//! | [`FileSystem`] | navigation, open/create, mkdir_all, remove_all, truncate | [`ExtendedFs`](crate::ExtendedFs) |
//! | [`SymLinker`] | lstat, lchown, readlink, symlink | backends with links |
//! | [`UnseekableFile`] / [`SeekableFile`] / [`File`] | open handles | backends, adapters |
//! | [`NativeFileOps`] | optimized handle operations | handles that can do better |
//!
//! ## Thread Safety
//!
//! Filer methods take `&self`; backends that mutate state use interior
//! mutability. Nothing here requires `Send` or `Sync`: the wrapper does no
//! locking of its own.

mod file;
mod file_system;
mod filer;
mod symlink;

pub use file::{File, NativeFileOps, SeekableFile, UnseekableFile};
pub use file_system::FileSystem;
pub use filer::{Filer, NativeOps};
pub use symlink::{SymLinker, SymlinkFileSystem};
