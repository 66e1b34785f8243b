//! Turning a stream-only backend into a full filesystem.
//!
//! The backend below only knows how to open forward-only streams and do the
//! eight filer operations. `ExtendedFs` supplies navigation, recursive
//! operations and truncation on top of it.
//!
//! Run with: `RUST_LOG=anyfs_extend=trace cargo run --example extend_memory`

use anyfs_extend::*;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;
use tracing_subscriber::EnvFilter;

// =============================================================================
// Step 1: A forward-only stream handle
// =============================================================================

type Store = Arc<RwLock<HashMap<PathBuf, Vec<u8>>>>;

/// Reads hand out the content captured at open; writes replace the file on
/// sync.
struct Stream {
    path: PathBuf,
    store: Store,
    unread: Vec<u8>,
    pending: Vec<u8>,
    dirty: bool,
    listing: Option<Vec<Metadata>>,
}

impl UnseekableFile for Stream {
    fn name(&self) -> &Path {
        &self.path
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, FsError> {
        let n = buf.len().min(self.unread.len());
        buf[..n].copy_from_slice(&self.unread[..n]);
        self.unread.drain(..n);
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, FsError> {
        if self.listing.is_some() && !buf.is_empty() {
            return Err(FsError::IsADirectory {
                path: self.path.clone(),
                operation: "write",
            });
        }
        self.pending.extend_from_slice(buf);
        self.dirty = true;
        Ok(buf.len())
    }

    fn close(&mut self) -> Result<(), FsError> {
        self.sync()
    }

    fn sync(&mut self) -> Result<(), FsError> {
        if self.dirty && self.listing.is_none() {
            let data = std::mem::take(&mut self.pending);
            self.store.write().unwrap().insert(self.path.clone(), data);
            self.dirty = false;
        }
        Ok(())
    }

    fn stat(&self) -> Result<Metadata, FsError> {
        let mode = if self.listing.is_some() {
            FileMode::DIR | FileMode::DEFAULT_DIR
        } else {
            FileMode::DEFAULT_FILE
        };
        Ok(Metadata {
            name: file_name(&self.path),
            size: self.unread.len() as u64,
            mode,
            modified: SystemTime::now(),
        })
    }

    fn read_dir(&mut self, count: usize) -> Result<Vec<Metadata>, FsError> {
        let listing = self.listing.as_mut().ok_or(FsError::NotADirectory {
            path: self.path.clone(),
            operation: "read_dir",
        })?;
        let n = if count == 0 {
            listing.len()
        } else {
            count.min(listing.len())
        };
        Ok(listing.drain(..n).collect())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "/".into())
}

// =============================================================================
// Step 2: The minimal filer
// =============================================================================

struct StreamFiler {
    files: Store,
    dirs: RwLock<HashSet<PathBuf>>,
}

impl StreamFiler {
    fn new() -> Self {
        let dirs = HashSet::from([PathBuf::from("/")]);
        Self {
            files: Store::default(),
            dirs: RwLock::new(dirs),
        }
    }

    fn children(&self, dir: &Path) -> Vec<PathBuf> {
        let files = self.files.read().unwrap();
        let dirs = self.dirs.read().unwrap();
        files
            .keys()
            .chain(dirs.iter())
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect()
    }

    fn require_parent(&self, path: &Path) -> Result<(), FsError> {
        let parent = path.parent().unwrap_or(Path::new("/"));
        if self.dirs.read().unwrap().contains(parent) {
            Ok(())
        } else {
            Err(FsError::NotFound {
                path: parent.to_path_buf(),
            })
        }
    }
}

impl Filer for StreamFiler {
    fn open_file(
        &self,
        path: &Path,
        flags: OpenFlags,
        _mode: FileMode,
    ) -> Result<Box<dyn File>, FsError> {
        let mut stream = Stream {
            path: path.to_path_buf(),
            store: Arc::clone(&self.files),
            unread: Vec::new(),
            pending: Vec::new(),
            dirty: false,
            listing: None,
        };

        if self.dirs.read().unwrap().contains(path) {
            let listing = self
                .children(path)
                .iter()
                .map(|child| self.stat(child))
                .collect::<Result<_, _>>()?;
            stream.listing = Some(listing);
        } else {
            let existing = self.files.read().unwrap().get(path).cloned();
            match existing {
                Some(_) if flags.contains(OpenFlags::TRUNC) => stream.dirty = true,
                Some(data) => stream.unread = data,
                None if flags.contains(OpenFlags::CREATE) => {
                    self.require_parent(path)?;
                    stream.dirty = true;
                }
                None => {
                    return Err(FsError::NotFound {
                        path: path.to_path_buf(),
                    });
                }
            }
        }

        Ok(Box::new(extend_unseekable(stream)?))
    }

    fn mkdir(&self, path: &Path, _mode: FileMode) -> Result<(), FsError> {
        if self.stat(path).is_ok() {
            return Err(FsError::AlreadyExists {
                path: path.to_path_buf(),
                operation: "mkdir",
            });
        }
        self.require_parent(path)?;
        self.dirs.write().unwrap().insert(path.to_path_buf());
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<(), FsError> {
        if self.files.write().unwrap().remove(path).is_some() {
            return Ok(());
        }
        if !self.children(path).is_empty() {
            return Err(FsError::DirectoryNotEmpty {
                path: path.to_path_buf(),
            });
        }
        if self.dirs.write().unwrap().remove(path) {
            Ok(())
        } else {
            Err(FsError::NotFound {
                path: path.to_path_buf(),
            })
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        let data = self
            .files
            .write()
            .unwrap()
            .remove(from)
            .ok_or(FsError::NotSupported {
                operation: "rename directory",
            })?;
        self.files.write().unwrap().insert(to.to_path_buf(), data);
        Ok(())
    }

    fn stat(&self, path: &Path) -> Result<Metadata, FsError> {
        if self.dirs.read().unwrap().contains(path) {
            return Ok(Metadata {
                name: file_name(path),
                mode: FileMode::DIR | FileMode::DEFAULT_DIR,
                ..Metadata::default()
            });
        }
        let files = self.files.read().unwrap();
        let data = files.get(path).ok_or(FsError::NotFound {
            path: path.to_path_buf(),
        })?;
        Ok(Metadata {
            name: file_name(path),
            size: data.len() as u64,
            ..Metadata::default()
        })
    }

    fn chmod(&self, path: &Path, _mode: FileMode) -> Result<(), FsError> {
        self.stat(path).map(drop)
    }

    fn chtimes(&self, path: &Path, _atime: SystemTime, _mtime: SystemTime) -> Result<(), FsError> {
        self.stat(path).map(drop)
    }

    fn chown(&self, path: &Path, _uid: u32, _gid: u32) -> Result<(), FsError> {
        self.stat(path).map(drop)
    }
}

// =============================================================================
// Step 3: Use it as a complete filesystem
// =============================================================================

fn main() -> Result<(), FsError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut fs = StreamFiler::new().extend();
    println!("native capabilities: {:?}", fs.capabilities());

    fs.mkdir_all(Path::new("/projects/demo/src"), FileMode::DEFAULT_DIR)?;
    fs.chdir(Path::new("/projects/demo"))?;
    println!("cwd: {}", fs.getwd()?.display());

    fs.write_file(Path::new("src/lib.txt"), b"pub fn answer() -> u32 { 42 }\n")?;
    fs.write_file(Path::new("README"), b"demo project")?;
    fs.truncate(Path::new("README"), 4)?;
    println!(
        "README: {:?}",
        String::from_utf8_lossy(&fs.read_file(Path::new("README"))?)
    );

    let mut file = fs.open(Path::new("src/lib.txt"))?;
    let mut head = [0u8; 6];
    file.read_at(&mut head, 4)?;
    file.close()?;
    println!("bytes 4..10 of src/lib.txt: {:?}", String::from_utf8_lossy(&head));

    fs.chdir(Path::new(".."))?;
    fs.remove_all(Path::new("demo"))?;
    println!(
        "after remove_all, /projects/demo exists: {}",
        fs.exists(Path::new("/projects/demo"))?
    );

    Ok(())
}
