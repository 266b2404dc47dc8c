//! Error conversion utilities for CLI.
//!
//! Converts vfs-export-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use vfs_export_core::ExportError;
use vfs_export_core::error::DeliveryError;
use vfs_export_core::error::FsError;

/// Converts `ExportError` to user-friendly anyhow error with context
pub fn convert_export_error(err: ExportError, url: &str) -> anyhow::Error {
    let hint = match &err {
        ExportError::Enumeration(fs_err) => fs_hint(fs_err, url),
        ExportError::Delivery(DeliveryError::AlreadyExists { .. }) => {
            Some("Use --force to overwrite the existing archive.".to_string())
        }
        ExportError::Delivery(DeliveryError::Io(_)) => {
            Some("Check that the output directory exists and is writable.".to_string())
        }
        _ => None,
    };

    with_hint(anyhow::Error::from(err), hint)
}

/// Converts an error from a listing run; these are reported without the
/// download wording.
pub fn convert_list_error(err: ExportError, url: &str) -> anyhow::Error {
    match err {
        ExportError::Enumeration(fs_err) => convert_fs_error(fs_err, url),
        other => anyhow::Error::from(other),
    }
}

/// Converts `FsError` to user-friendly anyhow error with context
pub fn convert_fs_error(err: FsError, url: &str) -> anyhow::Error {
    let hint = fs_hint(&err, url);
    with_hint(anyhow::Error::from(err), hint)
}

fn fs_hint(err: &FsError, url: &str) -> Option<String> {
    match err {
        FsError::Transport { .. } => Some(format!(
            "Check that the development server at '{url}' is running and reachable, \
             or raise --timeout."
        )),
        FsError::Status { status: 404, .. } => {
            Some("Check --prefix and --root; the path was not found on the server.".to_string())
        }
        FsError::Decode { .. } => Some(
            "The server did not return a directory listing. Check --prefix.".to_string(),
        ),
        FsError::InvalidUrl { .. } => {
            Some("Pass a full http:// or https:// URL, e.g. http://localhost:5173".to_string())
        }
        _ => None,
    }
}

fn with_hint(err: anyhow::Error, hint: Option<String>) -> anyhow::Error {
    match hint {
        Some(hint) => anyhow!("{err}\nHINT: {hint}"),
        None => err,
    }
}
