//! In-memory virtual filesystem.
//!
//! Directories keep their entries in insertion order, which makes traversal
//! order fully predictable. Individual paths can be marked as failing to
//! exercise error handling.

use super::FileSystem;
use crate::error::FsError;
use crate::error::RequestKind;
use crate::types::DirEntry;
use crate::types::VirtualPath;
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Mutex;

/// Status reported for paths that do not exist.
const NOT_FOUND: u16 = 404;

/// Status reported for paths marked as failing.
const INTERNAL_ERROR: u16 = 500;

/// A virtual filesystem held entirely in memory.
///
/// # Examples
///
/// ```
/// use vfs_export_core::fs::FileSystem;
/// use vfs_export_core::fs::MemoryFileSystem;
/// use vfs_export_core::types::VirtualPath;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fs = MemoryFileSystem::new()
///     .with_file("/package.json", b"{}")?
///     .with_file("/src/main.ts", b"console.log(1)")?;
///
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let entries = runtime.block_on(fs.read_dir(&VirtualPath::root()))?;
/// assert_eq!(entries.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    dirs: HashMap<VirtualPath, Vec<DirEntry>>,
    files: HashMap<VirtualPath, Vec<u8>>,
    failing: HashSet<VirtualPath>,
    requests: Mutex<Vec<VirtualPath>>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem containing only the root directory.
    #[must_use]
    pub fn new() -> Self {
        let mut fs = Self::default();
        fs.dirs.insert(VirtualPath::root(), Vec::new());
        fs
    }

    /// Adds a file, creating missing parent directories.
    ///
    /// Adding a file that already exists replaces its content without
    /// changing its position in the listing.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not a valid file path.
    pub fn with_file(mut self, path: &str, content: &[u8]) -> Result<Self, FsError> {
        self.insert_file(path, content)?;
        Ok(self)
    }

    /// Adds a directory, creating missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not a valid directory path.
    pub fn with_dir(mut self, path: &str) -> Result<Self, FsError> {
        let path = VirtualPath::parse(path)?;
        if !path.is_dir() {
            return Err(FsError::InvalidPath {
                path: path.to_string(),
                reason: "directory paths must end with '/'".to_string(),
            });
        }
        self.ensure_dir(&path);
        Ok(self)
    }

    /// Appends a raw listing entry to a directory without creating the node it
    /// refers to.
    ///
    /// Useful for listings that report names the filesystem cannot serve, such
    /// as duplicates or malformed names.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` is not a valid directory path.
    pub fn with_raw_entry(mut self, dir: &str, entry: DirEntry) -> Result<Self, FsError> {
        let dir = VirtualPath::parse(dir)?;
        self.ensure_dir(&dir);
        self.dirs.entry(dir).or_default().push(entry);
        Ok(self)
    }

    /// Marks a path so that every read of it fails with status 500.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not a valid virtual path.
    pub fn with_failure(mut self, path: &str) -> Result<Self, FsError> {
        self.failing.insert(VirtualPath::parse(path)?);
        Ok(self)
    }

    /// Adds a file in place.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not a valid file path.
    pub fn insert_file(&mut self, path: &str, content: &[u8]) -> Result<(), FsError> {
        let path = VirtualPath::parse(path)?;
        if path.is_dir() {
            return Err(FsError::InvalidPath {
                path: path.to_string(),
                reason: "file paths must not end with '/'".to_string(),
            });
        }

        let parent = parent_of(&path);
        self.ensure_dir(&parent);
        if self.files.insert(path.clone(), content.to_vec()).is_none() {
            self.dirs
                .entry(parent)
                .or_default()
                .push(DirEntry::file(path.name()));
        }
        Ok(())
    }

    /// Returns every path requested so far, in request order.
    #[must_use]
    pub fn requests(&self) -> Vec<VirtualPath> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    fn ensure_dir(&mut self, path: &VirtualPath) {
        if self.dirs.contains_key(path) {
            return;
        }

        if !path.is_root() {
            let parent = parent_of(path);
            self.ensure_dir(&parent);
            self.dirs
                .entry(parent)
                .or_default()
                .push(DirEntry::directory(path.name()));
        }
        self.dirs.insert(path.clone(), Vec::new());
    }

    fn record(&self, path: &VirtualPath) {
        if let Ok(mut log) = self.requests.lock() {
            log.push(path.clone());
        }
    }

    fn check_failure(&self, path: &VirtualPath, kind: RequestKind) -> Result<(), FsError> {
        if self.failing.contains(path) {
            return Err(FsError::Status {
                kind,
                path: path.to_string(),
                status: INTERNAL_ERROR,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl FileSystem for MemoryFileSystem {
    async fn read_dir(&self, path: &VirtualPath) -> Result<Vec<DirEntry>, FsError> {
        self.record(path);
        self.check_failure(path, RequestKind::Directory)?;
        self.dirs.get(path).cloned().ok_or_else(|| FsError::Status {
            kind: RequestKind::Directory,
            path: path.to_string(),
            status: NOT_FOUND,
        })
    }

    async fn read_file(&self, path: &VirtualPath) -> Result<Vec<u8>, FsError> {
        self.record(path);
        self.check_failure(path, RequestKind::File)?;
        self.files.get(path).cloned().ok_or_else(|| FsError::Status {
            kind: RequestKind::File,
            path: path.to_string(),
            status: NOT_FOUND,
        })
    }
}

/// Returns the parent directory of a non-root path.
fn parent_of(path: &VirtualPath) -> VirtualPath {
    let trimmed = path.as_str().trim_end_matches('/');
    let cut = trimmed.rfind('/').map_or(0, |idx| idx + 1);
    VirtualPath::parse(&trimmed[..cut]).unwrap_or_else(|_| VirtualPath::root())
}
