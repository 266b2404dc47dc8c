//! Access to the virtual project filesystem.
//!
//! The virtual filesystem is only reachable through request/response calls.
//! [`FileSystem`] is the seam: [`HttpFileSystem`] talks to a live endpoint,
//! [`MemoryFileSystem`] serves an in-process tree.

pub mod http;
pub mod memory;

pub use http::HttpFileSystem;
pub use memory::MemoryFileSystem;

use crate::error::FsError;
use crate::types::DirEntry;
use crate::types::VirtualPath;
use async_trait::async_trait;

/// Read-only accessor for a virtual filesystem.
///
/// Implementations must return directory entries in a stable order; the
/// export preserves that order in the archive.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Lists the entries of a directory path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    async fn read_dir(&self, path: &VirtualPath) -> Result<Vec<DirEntry>, FsError>;

    /// Reads the full content of a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    async fn read_file(&self, path: &VirtualPath) -> Result<Vec<u8>, FsError>;
}

#[async_trait]
impl<T: FileSystem + ?Sized> FileSystem for &T {
    async fn read_dir(&self, path: &VirtualPath) -> Result<Vec<DirEntry>, FsError> {
        (**self).read_dir(path).await
    }

    async fn read_file(&self, path: &VirtualPath) -> Result<Vec<u8>, FsError> {
        (**self).read_file(path).await
    }
}

#[async_trait]
impl<T: FileSystem + ?Sized> FileSystem for Box<T> {
    async fn read_dir(&self, path: &VirtualPath) -> Result<Vec<DirEntry>, FsError> {
        (**self).read_dir(path).await
    }

    async fn read_file(&self, path: &VirtualPath) -> Result<Vec<u8>, FsError> {
        (**self).read_file(path).await
    }
}
