//! Capability descriptors for optional native operations.
//!
//! A backend (or file handle) advertises which optional operations it
//! implements itself. The wrappers read the descriptor once, when they are
//! constructed, and dispatch on it for every call afterwards.

use bitflags::bitflags;

bitflags! {
    /// Optional operations a [`Filer`](crate::Filer) implements natively.
    ///
    /// Advertised through [`NativeOps::capabilities`](crate::NativeOps::capabilities).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Capabilities: u32 {
        /// `open` for reading.
        const OPEN = 1 << 0;
        /// `create` (create or truncate).
        const CREATE = 1 << 1;
        /// `chdir` and `getwd`; the backend tracks its own working directory.
        const NAVIGATE = 1 << 2;
        /// Recursive directory creation.
        const MKDIR_ALL = 1 << 3;
        /// Recursive removal.
        const REMOVE_ALL = 1 << 4;
        /// Truncate by path.
        const TRUNCATE = 1 << 5;
        /// Path separator.
        const SEPARATOR = 1 << 6;
        /// Path list separator.
        const LIST_SEPARATOR = 1 << 7;
        /// Temporary directory lookup.
        const TEMP_DIR = 1 << 8;
    }
}

bitflags! {
    /// Optional operations a [`SeekableFile`](crate::SeekableFile) implements natively.
    ///
    /// Advertised through [`NativeFileOps::capabilities`](crate::NativeFileOps::capabilities).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct FileCapabilities: u32 {
        /// `read_at` and `write_at`.
        const POSITIONAL = 1 << 0;
        /// `write_str`.
        const WRITE_STR = 1 << 1;
        /// `set_len`.
        const SET_LEN = 1 << 2;
        /// `read_dir_names`.
        const READ_DIR_NAMES = 1 << 3;
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::empty()
    }
}

impl Default for FileCapabilities {
    fn default() -> Self {
        Self::empty()
    }
}
