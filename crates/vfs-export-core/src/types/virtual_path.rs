//! Validated path type for the virtual project filesystem.

use crate::error::FsError;
use std::fmt;

/// Separator used by every virtual path.
pub const SEPARATOR: char = '/';

/// A location in the virtual filesystem.
///
/// `VirtualPath` always begins with `/`. A directory path always ends with
/// `/`, and a file path never does. Values are only produced by the
/// validating constructors, so a child path built from an entry name can
/// never escape its parent.
///
/// # Examples
///
/// ```
/// use vfs_export_core::types::VirtualPath;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = VirtualPath::root();
/// let src = root.join_dir("src")?;
/// let file = src.join_file("main.ts")?;
///
/// assert_eq!(file.as_str(), "/src/main.ts");
/// assert_eq!(file.archive_name(), "src/main.ts");
/// assert!(src.is_dir());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VirtualPath(String);

impl VirtualPath {
    /// Returns the root directory `/`.
    #[must_use]
    pub fn root() -> Self {
        Self(SEPARATOR.to_string())
    }

    /// Parses and validates a path string.
    ///
    /// # Errors
    ///
    /// Returns `FsError::InvalidPath` if the path does not start with `/`,
    /// contains empty segments, or contains `.` or `..` segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use vfs_export_core::types::VirtualPath;
    ///
    /// assert!(VirtualPath::parse("/src/").is_ok());
    /// assert!(VirtualPath::parse("src/").is_err());
    /// assert!(VirtualPath::parse("/src/../etc").is_err());
    /// ```
    pub fn parse(path: &str) -> Result<Self, FsError> {
        let Some(rest) = path.strip_prefix(SEPARATOR) else {
            return Err(invalid(path, "must start with '/'"));
        };

        if rest.is_empty() {
            return Ok(Self::root());
        }

        let body = rest.strip_suffix(SEPARATOR).unwrap_or(rest);
        for segment in body.split(SEPARATOR) {
            validate_name(segment).map_err(|reason| invalid(path, reason))?;
        }

        Ok(Self(path.to_string()))
    }

    /// Builds the path of a child file of this directory.
    ///
    /// # Errors
    ///
    /// Returns `FsError::InvalidPath` if this path is not a directory or the
    /// name is not a single valid segment.
    pub fn join_file(&self, name: &str) -> Result<Self, FsError> {
        self.check_child(name)?;
        Ok(Self(format!("{}{name}", self.0)))
    }

    /// Builds the path of a child directory of this directory.
    ///
    /// # Errors
    ///
    /// Returns `FsError::InvalidPath` if this path is not a directory or the
    /// name is not a single valid segment.
    pub fn join_dir(&self, name: &str) -> Result<Self, FsError> {
        self.check_child(name)?;
        Ok(Self(format!("{}{name}{SEPARATOR}", self.0)))
    }

    fn check_child(&self, name: &str) -> Result<(), FsError> {
        if !self.is_dir() {
            return Err(invalid(&self.0, "cannot join onto a file path"));
        }
        validate_name(name).map_err(|reason| invalid(name, reason))
    }

    /// Returns `true` if this path denotes a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.0.ends_with(SEPARATOR)
    }

    /// Returns `true` if this is the root directory.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// Returns the path with its leading separator removed.
    ///
    /// This is the name used for the path inside an archive.
    #[must_use]
    pub fn archive_name(&self) -> &str {
        self.0.strip_prefix(SEPARATOR).unwrap_or(&self.0)
    }

    /// Returns the last segment of the path, without trailing separator.
    #[must_use]
    pub fn name(&self) -> &str {
        let trimmed = self.0.trim_end_matches(SEPARATOR);
        trimmed.rsplit(SEPARATOR).next().unwrap_or(trimmed)
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VirtualPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("empty path segment");
    }
    if name == "." || name == ".." {
        return Err("relative path segment");
    }
    if name.contains(SEPARATOR) {
        return Err("segment contains '/'");
    }
    if name.contains('\0') {
        return Err("segment contains a null byte");
    }
    Ok(())
}

fn invalid(path: &str, reason: &str) -> FsError {
    FsError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
