//! Transient object URL delivery.

use super::Delivery;
use crate::error::DeliveryError;
use std::fmt;
use tracing::debug;

/// Short-lived handle under which a blob can be referenced for one download.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// Wraps a host-issued reference.
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Returns the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host-side download primitives.
pub trait BlobHost: Send {
    /// Registers `data` and returns a transient reference to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob cannot be registered.
    fn create_object_url(&mut self, data: Vec<u8>) -> Result<ObjectUrl, DeliveryError>;

    /// Starts a save of the referenced blob under `filename`.
    ///
    /// # Errors
    ///
    /// Returns an error if the save could not be started.
    fn trigger_save(&mut self, url: &ObjectUrl, filename: &str) -> Result<(), DeliveryError>;

    /// Releases a reference returned by [`BlobHost::create_object_url`].
    fn revoke_object_url(&mut self, url: &ObjectUrl);
}

/// [`Delivery`] built on a [`BlobHost`].
///
/// Each delivery creates exactly one object URL and revokes it exactly once,
/// whether or not the save could be triggered.
///
/// # Examples
///
/// ```no_run
/// use vfs_export_core::delivery::Delivery;
/// use vfs_export_core::delivery::DirectoryHost;
/// use vfs_export_core::delivery::ObjectUrlDelivery;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut delivery = ObjectUrlDelivery::new(DirectoryHost::new("downloads"));
/// delivery.deliver(b"PK\x05\x06".to_vec(), "project-2024-03-15.zip")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ObjectUrlDelivery<H> {
    host: H,
}

impl<H: BlobHost> ObjectUrlDelivery<H> {
    /// Wraps `host`.
    pub const fn new(host: H) -> Self {
        Self { host }
    }

    /// Returns the underlying host.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Consumes the delivery and returns the underlying host.
    pub fn into_host(self) -> H {
        self.host
    }
}

impl<H: BlobHost> Delivery for ObjectUrlDelivery<H> {
    fn deliver(&mut self, data: Vec<u8>, filename: &str) -> Result<(), DeliveryError> {
        let url = self.host.create_object_url(data)?;
        debug!(%url, filename, "triggering save");

        let result = self.host.trigger_save(&url, filename);
        self.host.revoke_object_url(&url);
        result
    }
}
