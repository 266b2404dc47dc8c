//! Data model for the virtual project filesystem.
//!
//! Paths are validated on construction: a `VirtualPath` always starts with
//! `/`, and directory paths always end with `/`.

pub mod entry;
pub mod virtual_path;

pub use entry::ArchiveEntry;
pub use entry::DirEntry;
pub use entry::EntryKind;
pub use entry::FileRecord;
pub use virtual_path::VirtualPath;
