//! Configuration for project export operations.

use crate::ExportError;
use crate::Result;
use crate::types::VirtualPath;

/// Entry names excluded from every export by default.
pub const DEFAULT_EXCLUDES: [&str; 3] = ["node_modules", ".git", "dist"];

/// Default archive filename prefix.
pub const DEFAULT_FILENAME_PREFIX: &str = "project";

/// Default DEFLATE compression level (maximum).
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 9;

/// Configuration for project export operations.
///
/// Controls which part of the virtual tree is exported, which entries are
/// excluded, and how the archive is compressed and named.
///
/// # Examples
///
/// ```
/// use vfs_export_core::ExportConfig;
///
/// // Export the whole project with default exclusions
/// let config = ExportConfig::default();
/// assert_eq!(config.compression_level, 9);
///
/// // Customize for specific needs
/// let custom = ExportConfig::default()
///     .with_exclude("*.log")
///     .with_filename_prefix("snapshot");
/// ```
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory the export starts from.
    ///
    /// Default: `/`.
    pub root: VirtualPath,

    /// Entry name patterns to exclude.
    ///
    /// Matched against each entry name, never the full path. Supports exact
    /// names, `prefix*` and `*suffix`.
    ///
    /// Default: `["node_modules", ".git", "dist"]`.
    pub exclude_patterns: Vec<String>,

    /// Include entries whose names start with `.`.
    ///
    /// Default: `false`.
    pub include_hidden: bool,

    /// DEFLATE compression level (1-9).
    ///
    /// Default: `9`.
    pub compression_level: u8,

    /// Prefix of the produced filename (`<prefix>-YYYY-MM-DD.zip`).
    ///
    /// Default: `"project"`.
    pub filename_prefix: String,

    /// Files larger than this many bytes are skipped and reported.
    ///
    /// Default: `None` (no limit).
    pub max_file_size: Option<u64>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            root: VirtualPath::root(),
            exclude_patterns: DEFAULT_EXCLUDES.iter().map(ToString::to_string).collect(),
            include_hidden: false,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            filename_prefix: DEFAULT_FILENAME_PREFIX.to_string(),
            max_file_size: None,
        }
    }
}

impl ExportConfig {
    /// Creates a new `ExportConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory.
    #[must_use]
    pub fn with_root(mut self, root: VirtualPath) -> Self {
        self.root = root;
        self
    }

    /// Adds an exclude pattern.
    #[must_use]
    pub fn with_exclude<S: Into<String>>(mut self, pattern: S) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Replaces the exclude patterns.
    #[must_use]
    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    /// Sets whether to include hidden entries.
    #[must_use]
    pub fn with_include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Sets the compression level.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = level;
        self
    }

    /// Sets the filename prefix.
    #[must_use]
    pub fn with_filename_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.filename_prefix = prefix.into();
        self
    }

    /// Sets the maximum file size.
    #[must_use]
    pub fn with_max_file_size(mut self, max_size: Option<u64>) -> Self {
        self.max_file_size = max_size;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::InvalidConfiguration` if:
    /// - the root is not a directory path
    /// - the compression level is outside 1-9
    /// - the filename prefix is empty or contains a path separator
    /// - an exclude pattern is empty
    pub fn validate(&self) -> Result<()> {
        if !self.root.is_dir() {
            return Err(invalid(format!(
                "root must be a directory path ending in '/': {}",
                self.root
            )));
        }

        if !(1..=9).contains(&self.compression_level) {
            return Err(invalid(format!(
                "compression level must be 1-9, got {}",
                self.compression_level
            )));
        }

        if self.filename_prefix.is_empty()
            || self.filename_prefix.contains(['/', '\\'])
        {
            return Err(invalid(format!(
                "filename prefix must be a plain name: {:?}",
                self.filename_prefix
            )));
        }

        if self.exclude_patterns.iter().any(String::is_empty) {
            return Err(invalid("exclude patterns must not be empty".to_string()));
        }

        Ok(())
    }
}

fn invalid(reason: String) -> ExportError {
    ExportError::InvalidConfiguration { reason }
}
