//! Directory listing entries and the records built from them.

use super::VirtualPath;
use crate::error::FsError;
use serde::Deserialize;

/// Kind of a node returned in a directory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

/// One entry of a directory listing.
///
/// Deserializes from the accessor's `{ "name": ..., "type": ... }` objects.
///
/// # Examples
///
/// ```
/// use vfs_export_core::types::DirEntry;
/// use vfs_export_core::types::EntryKind;
///
/// let entries: Vec<DirEntry> =
///     serde_json::from_str(r#"[{"name":"src","type":"directory"}]"#).unwrap();
/// assert_eq!(entries[0].kind, EntryKind::Directory);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirEntry {
    /// Entry name, a single path segment.
    pub name: String,

    /// Entry kind.
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl DirEntry {
    /// Creates a file entry.
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    /// Creates a directory entry.
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }

    /// Returns `true` if this entry is a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Resolves this entry to its child path under `parent`.
    ///
    /// # Errors
    ///
    /// Returns `FsError::InvalidPath` if the name cannot form a valid child.
    pub fn resolve(&self, parent: &VirtualPath) -> Result<VirtualPath, FsError> {
        match self.kind {
            EntryKind::File => parent.join_file(&self.name),
            EntryKind::Directory => parent.join_dir(&self.name),
        }
    }
}

/// Content of one file read from the virtual filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path the content was read from.
    pub path: VirtualPath,
    /// Raw file bytes.
    pub content: Vec<u8>,
}

/// A named entry ready to be written into an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Relative entry name (the path without its leading separator).
    pub name: String,
    /// Entry data.
    pub data: Vec<u8>,
}

impl From<FileRecord> for ArchiveEntry {
    fn from(record: FileRecord) -> Self {
        Self {
            name: record.path.archive_name().to_string(),
            data: record.content,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_listing() {
        let json = r#"[
            {"name": "index.html", "type": "file"},
            {"name": "src", "type": "directory"}
        ]"#;
        let entries: Vec<DirEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(
            entries,
            vec![DirEntry::file("index.html"), DirEntry::directory("src")]
        );
    }

    #[test]
    fn test_deserialize_unknown_kind_fails() {
        let json = r#"[{"name": "x", "type": "symlink"}]"#;
        assert!(serde_json::from_str::<Vec<DirEntry>>(json).is_err());
    }

    #[test]
    fn test_resolve() {
        let parent = VirtualPath::parse("/src/").unwrap();
        assert_eq!(
            DirEntry::file("a.ts").resolve(&parent).unwrap().as_str(),
            "/src/a.ts"
        );
        assert_eq!(
            DirEntry::directory("lib").resolve(&parent).unwrap().as_str(),
            "/src/lib/"
        );
        assert!(DirEntry::file("../x").resolve(&parent).is_err());
    }

    #[test]
    fn test_archive_entry_from_record() {
        let record = FileRecord {
            path: VirtualPath::parse("/src/a.ts").unwrap(),
            content: b"export {}".to_vec(),
        };
        let entry = ArchiveEntry::from(record);
        assert_eq!(entry.name, "src/a.ts");
        assert_eq!(entry.data, b"export {}");
    }
}
