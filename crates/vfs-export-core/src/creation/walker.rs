//! Virtual directory tree walking with filtering.
//!
//! The walk is iterative: pending nodes live on an explicit stack instead of
//! in nested futures, so suspension depth stays constant however deep the
//! project tree is.

use crate::config::ExportConfig;
use crate::creation::filters;
use crate::error::FsError;
use crate::fs::FileSystem;
use crate::types::VirtualPath;
use tracing::debug;
use tracing::trace;
use tracing::warn;

/// Walks a virtual directory tree with filtering based on `ExportConfig`.
///
/// Produces every file reachable from the root, depth-first, in the order the
/// filesystem lists directory entries. Directories themselves are never
/// emitted.
///
/// # Examples
///
/// ```
/// use vfs_export_core::ExportConfig;
/// use vfs_export_core::creation::walker::VirtualWalker;
/// use vfs_export_core::fs::MemoryFileSystem;
/// use vfs_export_core::types::VirtualPath;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fs = MemoryFileSystem::new()
///     .with_file("/src/a.ts", b"a")?
///     .with_file("/node_modules/x/index.js", b"x")?
///     .with_file("/README.md", b"r")?;
/// let config = ExportConfig::default();
///
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let files = runtime.block_on(VirtualWalker::new(&fs, &config).list_files(&VirtualPath::root()))?;
///
/// let names: Vec<&str> = files.iter().map(VirtualPath::as_str).collect();
/// assert_eq!(names, ["/src/a.ts", "/README.md"]);
/// # Ok(())
/// # }
/// ```
pub struct VirtualWalker<'a, F: ?Sized> {
    fs: &'a F,
    config: &'a ExportConfig,
}

impl<'a, F: FileSystem + ?Sized> VirtualWalker<'a, F> {
    /// Creates a new walker over `fs`.
    #[must_use]
    pub fn new(fs: &'a F, config: &'a ExportConfig) -> Self {
        Self { fs, config }
    }

    /// Lists every non-excluded file under `root`.
    ///
    /// The result is a pre-order flattening of the tree: each directory is
    /// expanded in place, before any of its later siblings.
    ///
    /// # Errors
    ///
    /// Returns the first error reported for any directory listing, or
    /// `FsError::InvalidPath` if `root` is not a directory or a listing
    /// contains a name that would leave its parent (`.`, `..`, or a name
    /// with `/`). Empty names and names with a null byte are ignored. No
    /// partial list is returned.
    pub async fn list_files(&self, root: &VirtualPath) -> Result<Vec<VirtualPath>, FsError> {
        if !root.is_dir() {
            return Err(FsError::InvalidPath {
                path: root.to_string(),
                reason: "traversal root must be a directory".to_string(),
            });
        }

        let mut files = Vec::new();
        let mut pending = vec![root.clone()];

        while let Some(path) = pending.pop() {
            if !path.is_dir() {
                trace!(path = %path, "discovered file");
                files.push(path);
                continue;
            }

            let entries = self.fs.read_dir(&path).await?;
            debug!(path = %path, entries = entries.len(), "listed directory");

            let mut children = Vec::with_capacity(entries.len());
            for entry in &entries {
                if is_unusable_name(&entry.name) {
                    warn!(parent = %path, name = ?entry.name, "ignoring entry with unusable name");
                    continue;
                }
                if filters::should_skip(&entry.name, self.config) {
                    trace!(parent = %path, name = %entry.name, "excluded entry");
                    continue;
                }
                children.push(entry.resolve(&path)?);
            }

            // Reversed so the first listed child is popped next.
            pending.extend(children.into_iter().rev());
        }

        Ok(files)
    }
}

/// Names that cannot address anything on the server but cannot leave the
/// parent either.
fn is_unusable_name(name: &str) -> bool {
    name.is_empty() || name.contains('\0')
}

/// Lists every non-excluded file under the configured root.
///
/// # Errors
///
/// See [`VirtualWalker::list_files`].
pub async fn collect_files<F: FileSystem + ?Sized>(
    fs: &F,
    config: &ExportConfig,
) -> Result<Vec<VirtualPath>, FsError> {
    VirtualWalker::new(fs, config).list_files(&config.root).await
}
