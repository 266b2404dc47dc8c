//! Blob host that saves downloads into a local directory.

use super::BlobHost;
use super::ObjectUrl;
use crate::error::DeliveryError;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::debug;
use tracing::warn;

/// [`BlobHost`] backed by a download directory.
///
/// A blob is staged in a hidden temporary file inside the directory; the
/// object URL points at that file. Saving copies it to a second temporary
/// file and renames that into place, refusing to replace an existing file
/// unless overwriting is enabled. Revoking deletes the staged file.
///
/// # Examples
///
/// ```no_run
/// use vfs_export_core::delivery::Delivery;
/// use vfs_export_core::delivery::DirectoryHost;
/// use vfs_export_core::delivery::ObjectUrlDelivery;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let host = DirectoryHost::new("downloads").with_overwrite(true);
/// let mut delivery = ObjectUrlDelivery::new(host);
/// delivery.deliver(vec![0; 22], "project-2024-03-15.zip")?;
///
/// let saved = delivery.host().saved_paths();
/// assert_eq!(saved.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DirectoryHost {
    dir: PathBuf,
    overwrite: bool,
    staged: HashMap<ObjectUrl, NamedTempFile>,
    saved: Vec<PathBuf>,
}

impl DirectoryHost {
    /// Creates a host saving into `dir`, which is created on first use.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            overwrite: false,
            staged: HashMap::new(),
            saved: Vec::new(),
        }
    }

    /// Sets whether an existing file with the same name may be replaced.
    ///
    /// Default: `false`.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Returns the download directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns every file saved so far.
    #[must_use]
    pub fn saved_paths(&self) -> &[PathBuf] {
        &self.saved
    }

    /// Number of object URLs that are still live.
    #[must_use]
    pub fn live_urls(&self) -> usize {
        self.staged.len()
    }

    fn destination(&self, filename: &str) -> Result<PathBuf, DeliveryError> {
        let plain = !filename.is_empty()
            && filename != "."
            && filename != ".."
            && !filename.contains(['/', '\\']);
        if !plain {
            return Err(DeliveryError::Rejected {
                reason: format!("invalid download filename: {filename:?}"),
            });
        }
        Ok(self.dir.join(filename))
    }

    fn stage_file(&self) -> io::Result<NamedTempFile> {
        tempfile::Builder::new()
            .prefix(".vfs-export-")
            .suffix(".part")
            .tempfile_in(&self.dir)
    }
}

impl BlobHost for DirectoryHost {
    fn create_object_url(&mut self, data: Vec<u8>) -> Result<ObjectUrl, DeliveryError> {
        fs::create_dir_all(&self.dir)?;

        let mut staged = self.stage_file()?;
        staged.write_all(&data)?;
        staged.flush()?;

        let url = ObjectUrl::new(format!("blob:file://{}", staged.path().display()));
        debug!(%url, bytes = data.len(), "staged blob");
        self.staged.insert(url.clone(), staged);
        Ok(url)
    }

    fn trigger_save(&mut self, url: &ObjectUrl, filename: &str) -> Result<(), DeliveryError> {
        let destination = self.destination(filename)?;
        let staged = self
            .staged
            .get(url)
            .ok_or_else(|| DeliveryError::UnknownUrl {
                url: url.to_string(),
            })?;

        // The copy lives next to the destination, so publishing it is a
        // rename and a failed copy never leaves a partial download behind.
        let copy = self.stage_file()?;
        fs::copy(staged.path(), copy.path())?;

        let published = if self.overwrite {
            copy.persist(&destination)
        } else {
            copy.persist_noclobber(&destination)
        };
        match published {
            Ok(_) => {}
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                return Err(DeliveryError::AlreadyExists { path: destination });
            }
            Err(e) => return Err(e.error.into()),
        }

        debug!(path = %destination.display(), "saved download");
        self.saved.push(destination);
        Ok(())
    }

    fn revoke_object_url(&mut self, url: &ObjectUrl) {
        if let Some(staged) = self.staged.remove(url)
            && let Err(e) = staged.close()
        {
            warn!(%url, error = %e, "failed to remove staged blob");
        }
    }
}
