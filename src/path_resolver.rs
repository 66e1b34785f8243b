//! # Path Resolution
//!
//! Turns the path argument of an extended operation into the path handed to
//! the backend.
//!
//! ## Rules
//!
//! 1. A backend that tracks its own working directory
//!    ([`Capabilities::NAVIGATE`](crate::Capabilities::NAVIGATE)) gets every
//!    path unchanged.
//! 2. Otherwise a path is *absolute* if the host says so, or if it starts with
//!    `/` or `\`. Absolute paths are only cleaned.
//! 3. Anything else is joined onto the working directory, then cleaned.
//!
//! ## Virtual-Absolute Paths
//!
//! Rule 2 lets virtual backends use one separator convention on every host.
//! On Windows, `\data` is conventionally relative to the current drive; this
//! crate treats it as rooted. The convention belongs to this abstraction
//! layer, not to any host filesystem.
//!
//! A path starting with `\` uses `\` as its separator throughout: on hosts
//! where `\` is an ordinary file name character, [`clean`] first rewrites it
//! to `/`, so `\a\..\b` cleans to `/b`. Paths starting with anything else
//! keep their backslashes as part of the names.
//!
//! ## Cleaning
//!
//! [`clean`] is purely lexical: repeated separators collapse, `.` segments
//! disappear, and `..` removes the preceding segment. `..` directly under the
//! root stays at the root; leading `..` of a relative path is kept.

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use tracing::trace;

/// The host's path list separator.
#[cfg(windows)]
pub(crate) const HOST_LIST_SEPARATOR: char = ';';

/// The host's path list separator.
#[cfg(not(windows))]
pub(crate) const HOST_LIST_SEPARATOR: char = ':';

/// Resolves relative paths against a per-instance working directory.
///
/// # Example
///
/// ```rust
/// use anyfs_extend::PathResolver;
/// use std::path::{Path, PathBuf};
///
/// let mut resolver = PathResolver::new(false);
/// resolver.set_cwd(Path::new("/home/user"));
///
/// assert_eq!(resolver.resolve(Path::new("docs/../notes.txt")), PathBuf::from("/home/user/notes.txt"));
/// assert_eq!(resolver.resolve(Path::new("/etc//hosts")), PathBuf::from("/etc/hosts"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    cwd: PathBuf,
    passthrough: bool,
}

impl PathResolver {
    /// Create a resolver whose working directory is the root.
    ///
    /// With `passthrough` set, [`resolve`](Self::resolve) returns every path
    /// unchanged; used when the backend navigates on its own.
    pub fn new(passthrough: bool) -> Self {
        Self {
            cwd: PathBuf::from("/"),
            passthrough,
        }
    }

    /// The tracked working directory.
    #[inline]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Replace the working directory with the cleaned, resolved form of `dir`.
    pub fn set_cwd(&mut self, dir: &Path) {
        self.cwd = self.resolve(dir);
    }

    /// Returns `true` if paths are handed to the backend unchanged.
    #[inline]
    pub fn is_passthrough(&self) -> bool {
        self.passthrough
    }

    /// Resolve `path` for the backend.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if self.passthrough {
            return path.to_path_buf();
        }
        let resolved = if is_absolute(path) {
            clean(path)
        } else {
            clean(&self.cwd.join(path))
        };
        trace!(path = %path.display(), resolved = %resolved.display(), "resolved path");
        resolved
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Returns `true` if `path` starts with `/` or `\`.
///
/// Such paths are treated as absolute on every host.
pub fn is_virtual_absolute(path: &Path) -> bool {
    let bytes = path.as_os_str().as_encoded_bytes();
    matches!(bytes.first(), Some(b'/') | Some(b'\\'))
}

/// Returns `true` if `path` is absolute by the host rule or virtually absolute.
pub fn is_absolute(path: &Path) -> bool {
    path.is_absolute() || is_virtual_absolute(path)
}

/// Rewrite a `\`-led path with the host separator.
#[cfg(not(windows))]
fn host_form(path: &Path) -> Cow<'_, Path> {
    if path.as_os_str().as_encoded_bytes().first() == Some(&b'\\') {
        Cow::Owned(swap_backslashes(path))
    } else {
        Cow::Borrowed(path)
    }
}

#[cfg(windows)]
fn host_form(path: &Path) -> Cow<'_, Path> {
    Cow::Borrowed(path)
}

#[cfg(unix)]
fn swap_backslashes(path: &Path) -> PathBuf {
    use std::ffi::OsString;
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    let bytes = path
        .as_os_str()
        .as_bytes()
        .iter()
        .map(|&b| if b == b'\\' { b'/' } else { b })
        .collect();
    PathBuf::from(OsString::from_vec(bytes))
}

#[cfg(not(any(unix, windows)))]
fn swap_backslashes(path: &Path) -> PathBuf {
    PathBuf::from(path.to_string_lossy().replace('\\', "/"))
}

/// Lexically normalize `path`.
///
/// An empty relative result becomes `.`; a rooted result never climbs above
/// its root. A path starting with `\` is rooted on every host.
pub fn clean(path: &Path) -> PathBuf {
    let path = host_form(path);
    let mut prefix: Option<PathBuf> = None;
    let mut rooted = false;
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(p) => prefix = Some(PathBuf::from(p.as_os_str())),
            Component::RootDir => rooted = true,
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // `..` at the root is the root
                _ if rooted => {}
                _ => parts.push(component),
            },
            Component::Normal(_) => parts.push(component),
        }
    }

    let mut cleaned = prefix.unwrap_or_default();
    if rooted {
        cleaned.push(Component::RootDir);
    }
    for part in parts {
        cleaned.push(part);
    }
    if cleaned.as_os_str().is_empty() {
        cleaned.push(Component::CurDir);
    }
    cleaned
}
