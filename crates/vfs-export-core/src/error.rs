//! Error types for project export operations.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ExportError`.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Prefix applied to every user-facing export failure.
pub const DOWNLOAD_FAILED_PREFIX: &str = "Download failed: ";

/// Message used when the underlying cause carries no text.
pub const FALLBACK_MESSAGE: &str = "Failed to download project. Please try again.";

/// Kind of filesystem node a request targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// A directory listing request.
    Directory,
    /// A file content request.
    File,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => f.write_str("directory"),
            Self::File => f.write_str("file"),
        }
    }
}

/// Errors reported by a virtual filesystem accessor.
#[derive(Error, Debug)]
pub enum FsError {
    /// The accessor answered with a non-success status.
    #[error("Failed to read {kind}: {path} (status {status})")]
    Status {
        /// What was being read.
        kind: RequestKind,
        /// Virtual path of the request.
        path: String,
        /// Status code returned by the accessor.
        status: u16,
    },

    /// The request never produced a response.
    #[error("request for {path} failed: {source}")]
    Transport {
        /// Virtual path of the request.
        path: String,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },

    /// A directory listing body could not be decoded.
    #[error("invalid directory listing for {path}: {source}")]
    Decode {
        /// Virtual path of the directory.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A path or entry name cannot form a valid virtual path.
    #[error("invalid virtual path {path:?}: {reason}")]
    InvalidPath {
        /// The offending path or entry name.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The accessor base URL is malformed.
    #[error("invalid filesystem URL {url:?}: {reason}")]
    InvalidUrl {
        /// The URL as given.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FsError {
    /// Returns the status code if the accessor answered with one.
    ///
    /// # Examples
    ///
    /// ```
    /// use vfs_export_core::error::FsError;
    /// use vfs_export_core::error::RequestKind;
    ///
    /// let err = FsError::Status {
    ///     kind: RequestKind::File,
    ///     path: "/src/a.ts".to_string(),
    ///     status: 404,
    /// };
    /// assert_eq!(err.status(), Some(404));
    /// ```
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while handing a finished archive to the user.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The destination file exists and overwriting was not allowed.
    #[error("output file already exists: {}", .path.display())]
    AlreadyExists {
        /// Destination that already exists.
        path: PathBuf,
    },

    /// A transient reference was used after it was revoked, or never issued.
    #[error("unknown object URL: {url}")]
    UnknownUrl {
        /// The reference that could not be resolved.
        url: String,
    },

    /// The delivery target refused the download.
    #[error("{reason}")]
    Rejected {
        /// Reason given by the delivery target.
        reason: String,
    },
}

/// Fatal errors that abort a project export.
///
/// Every variant renders as `Download failed: <cause>`, or as
/// [`FALLBACK_MESSAGE`] when the cause has no text. The original cause is kept
/// as the error source.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Enumerating the project tree failed.
    #[error("{}", download_failed(.0))]
    Enumeration(#[from] FsError),

    /// The archive could not be written or finalized.
    #[error("{}", download_failed(.0))]
    Archive(#[from] zip::result::ZipError),

    /// The finished archive could not be delivered.
    #[error("{}", download_failed(.0))]
    Delivery(#[from] DeliveryError),

    /// The export configuration is invalid.
    #[error("{}", invalid_configuration(.reason))]
    InvalidConfiguration {
        /// Reason the configuration was rejected.
        reason: String,
    },
}

impl ExportError {
    /// Returns `true` if the export failed before any archive was started.
    ///
    /// # Examples
    ///
    /// ```
    /// use vfs_export_core::ExportError;
    /// use vfs_export_core::error::FsError;
    /// use vfs_export_core::error::RequestKind;
    ///
    /// let err = ExportError::Enumeration(FsError::Status {
    ///     kind: RequestKind::Directory,
    ///     path: "/".to_string(),
    ///     status: 500,
    /// });
    /// assert!(err.is_enumeration());
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Download failed: Failed to read directory: / (status 500)"
    /// );
    /// ```
    #[must_use]
    pub const fn is_enumeration(&self) -> bool {
        matches!(self, Self::Enumeration(_))
    }

    /// Returns `true` if the archive was built but could not be delivered.
    #[must_use]
    pub const fn is_delivery(&self) -> bool {
        matches!(self, Self::Delivery(_))
    }
}

/// Formats a cause into the single user-facing failure message.
///
/// # Examples
///
/// ```
/// use vfs_export_core::error::FALLBACK_MESSAGE;
/// use vfs_export_core::error::download_failed;
///
/// assert_eq!(download_failed(&"disk full"), "Download failed: disk full");
/// assert_eq!(download_failed(&""), FALLBACK_MESSAGE);
/// ```
pub fn download_failed(cause: &dyn fmt::Display) -> String {
    let message = cause.to_string();
    if message.trim().is_empty() {
        FALLBACK_MESSAGE.to_string()
    } else {
        format!("{DOWNLOAD_FAILED_PREFIX}{message}")
    }
}

fn invalid_configuration(reason: &str) -> String {
    download_failed(&format_args!("invalid configuration: {reason}"))
}
