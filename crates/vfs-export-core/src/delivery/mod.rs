//! Handing a finished archive to the user.
//!
//! [`Delivery`] is the single capability the exporter depends on.
//! [`ObjectUrlDelivery`] implements it on top of a [`BlobHost`], which models
//! the download mechanics: register the blob under a transient URL, trigger a
//! save for that URL, then revoke it.

pub mod directory;
pub mod object_url;

pub use directory::DirectoryHost;
pub use object_url::BlobHost;
pub use object_url::ObjectUrl;
pub use object_url::ObjectUrlDelivery;

use crate::error::DeliveryError;

/// Delivers a finished archive under a filename.
pub trait Delivery: Send {
    /// Hands `data` to the user as a file named `filename`.
    ///
    /// # Errors
    ///
    /// Returns an error if the download could not be triggered.
    fn deliver(&mut self, data: Vec<u8>, filename: &str) -> Result<(), DeliveryError>;
}

impl<D: Delivery + ?Sized> Delivery for &mut D {
    fn deliver(&mut self, data: Vec<u8>, filename: &str) -> Result<(), DeliveryError> {
        (**self).deliver(data, filename)
    }
}

impl<D: Delivery + ?Sized> Delivery for Box<D> {
    fn deliver(&mut self, data: Vec<u8>, filename: &str) -> Result<(), DeliveryError> {
        (**self).deliver(data, filename)
    }
}
