//! Export operation reporting and progress callbacks.

use crate::types::VirtualPath;
use std::time::Duration;

/// A file that was discovered but left out of the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Path of the skipped file.
    pub path: VirtualPath,
    /// Human-readable reason.
    pub reason: String,
}

/// Report of a project export.
///
/// Skipped files never fail an export; they are listed here instead.
///
/// # Examples
///
/// ```
/// use vfs_export_core::ExportReport;
///
/// let mut report = ExportReport::default();
/// report.bytes_written = 1000;
/// report.bytes_compressed = 250;
///
/// assert_eq!(report.compression_ratio(), 4.0);
/// assert_eq!(report.compression_percentage(), 75.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    /// Name of the produced archive.
    pub filename: String,

    /// Number of files found by traversal.
    pub files_discovered: usize,

    /// Number of files written to the archive.
    pub files_added: usize,

    /// Total bytes read from the filesystem and written to the archive
    /// (uncompressed).
    pub bytes_written: u64,

    /// Size of the finished archive in bytes.
    pub bytes_compressed: u64,

    /// Duration of the export.
    pub duration: Duration,

    /// Files that were not archived, in discovery order.
    pub skipped: Vec<SkippedFile>,
}

impl ExportReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a skipped file.
    ///
    /// # Examples
    ///
    /// ```
    /// use vfs_export_core::ExportReport;
    /// use vfs_export_core::types::VirtualPath;
    ///
    /// let mut report = ExportReport::new();
    /// report.add_skipped(VirtualPath::parse("/a.bin").unwrap(), "status 500");
    /// assert!(report.has_skipped());
    /// assert_eq!(report.files_skipped(), 1);
    /// ```
    pub fn add_skipped(&mut self, path: VirtualPath, reason: impl Into<String>) {
        self.skipped.push(SkippedFile {
            path,
            reason: reason.into(),
        });
    }

    /// Returns whether any file was skipped.
    #[must_use]
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// Number of skipped files.
    #[must_use]
    pub fn files_skipped(&self) -> usize {
        self.skipped.len()
    }

    /// Returns the compression ratio (uncompressed / compressed).
    ///
    /// Returns 0.0 if either size is 0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 || self.bytes_written == 0 {
            return 0.0;
        }
        self.bytes_written as f64 / self.bytes_compressed as f64
    }

    /// Returns the compression percentage (space saved).
    ///
    /// Returns 0.0 if `bytes_written` is 0 or the archive is larger than its
    /// input.
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_written == 0 {
            return 0.0;
        }
        let saved = self.bytes_written.saturating_sub(self.bytes_compressed);
        (saved as f64 / self.bytes_written as f64) * 100.0
    }
}

/// Callback trait for progress reporting during an export.
///
/// The trait requires `Send` so an export future stays `Send`.
///
/// # Examples
///
/// ```
/// use vfs_export_core::ProgressCallback;
///
/// struct SimpleProgress;
///
/// impl ProgressCallback for SimpleProgress {
///     fn on_entry_start(&mut self, path: &str, total: usize, current: usize) {
///         println!("Packing {current}/{total}: {path}");
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, path: &str) {
///         println!("Packed: {path}");
///     }
///
///     fn on_entry_skipped(&mut self, path: &str, reason: &str) {
///         println!("Skipped {path}: {reason}");
///     }
///
///     fn on_complete(&mut self) {
///         println!("Export complete");
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called before a file is read.
    ///
    /// # Arguments
    ///
    /// * `path` - Virtual path of the file
    /// * `total` - Total number of files discovered
    /// * `current` - Current file number (1-indexed)
    fn on_entry_start(&mut self, path: &str, total: usize, current: usize);

    /// Called with the size of each file written into the archive.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called when a file was written into the archive.
    fn on_entry_complete(&mut self, path: &str);

    /// Called when a file was left out of the archive.
    fn on_entry_skipped(&mut self, path: &str, reason: &str);

    /// Called once the archive has been delivered.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &str, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &str) {}

    fn on_entry_skipped(&mut self, _path: &str, _reason: &str) {}

    fn on_complete(&mut self) {}
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report() {
        let report = ExportReport::new();
        assert_eq!(report.files_added, 0);
        assert_eq!(report.files_discovered, 0);
        assert!(report.filename.is_empty());
        assert!(!report.has_skipped());
    }

    #[test]
    fn test_add_skipped_keeps_order() {
        let mut report = ExportReport::new();
        report.add_skipped(VirtualPath::parse("/b").unwrap(), "one");
        report.add_skipped(VirtualPath::parse("/a").unwrap(), "two".to_string());
        assert_eq!(report.files_skipped(), 2);
        assert_eq!(report.skipped[0].path.as_str(), "/b");
        assert_eq!(report.skipped[1].reason, "two");
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_compression_ratio() {
        let mut report = ExportReport::new();
        report.bytes_written = 1000;
        report.bytes_compressed = 500;
        assert_eq!(report.compression_ratio(), 2.0);

        report.bytes_compressed = 0;
        assert_eq!(report.compression_ratio(), 0.0);

        report.bytes_written = 0;
        report.bytes_compressed = 22;
        assert_eq!(report.compression_ratio(), 0.0);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_compression_percentage() {
        let mut report = ExportReport::new();
        report.bytes_written = 1000;
        report.bytes_compressed = 250;
        assert_eq!(report.compression_percentage(), 75.0);

        // Expansion
        report.bytes_written = 10;
        report.bytes_compressed = 130;
        assert_eq!(report.compression_percentage(), 0.0);

        report.bytes_written = 0;
        assert_eq!(report.compression_percentage(), 0.0);
    }
}
