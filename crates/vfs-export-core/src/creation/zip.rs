//! In-memory ZIP archive construction.
//!
//! Entries are written in insertion order with DEFLATE compression and a fixed
//! modification time, so the same input always produces the same archive.

use crate::types::ArchiveEntry;
use chrono::Datelike;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::io::Cursor;
use std::io::Write;
use zip::CompressionMethod;
use zip::DateTime;
use zip::ZipWriter;
use zip::result::ZipResult;
use zip::write::SimpleFileOptions;

/// Outcome of adding one entry to a [`ZipPacker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackOutcome {
    /// The name was new; the entry takes the next slot.
    Added,
    /// An entry with the same name was already buffered. It keeps its slot
    /// but now holds the new content.
    Replaced,
}

/// Builds a ZIP archive in memory.
///
/// Entries are buffered until [`ZipPacker::finish`], so a later entry with an
/// already used name replaces the earlier content in place.
///
/// # Examples
///
/// ```
/// use vfs_export_core::creation::zip::ZipPacker;
/// use vfs_export_core::types::ArchiveEntry;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut packer = ZipPacker::new(9, None);
/// packer.add(ArchiveEntry {
///     name: "src/a.ts".to_string(),
///     data: b"export {}".to_vec(),
/// });
/// let bytes = packer.finish()?;
///
/// let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))?;
/// assert_eq!(archive.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ZipPacker {
    options: SimpleFileOptions,
    entries: Vec<ArchiveEntry>,
    slots: HashMap<String, usize>,
    bytes_written: u64,
}

impl ZipPacker {
    /// Creates a packer using DEFLATE at `compression_level`.
    ///
    /// Entries are stamped with midnight of `modified`, or the ZIP epoch
    /// (1980-01-01) when no date is given or it predates the epoch.
    #[must_use]
    pub fn new(compression_level: u8, modified: Option<NaiveDate>) -> Self {
        let timestamp = modified.and_then(zip_datetime).unwrap_or_default();
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(compression_level)))
            .last_modified_time(timestamp)
            .unix_permissions(0o644);

        Self {
            options,
            entries: Vec::new(),
            slots: HashMap::new(),
            bytes_written: 0,
        }
    }

    /// Returns `true` if an entry with this name was added.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Number of distinct entries added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entry was added yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total uncompressed bytes the archive will hold.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Adds one entry.
    ///
    /// A name seen before keeps its original position; the last content
    /// added under it wins.
    pub fn add(&mut self, entry: ArchiveEntry) -> PackOutcome {
        let size = entry.data.len() as u64;

        if let Some(&slot) = self.slots.get(&entry.name) {
            let previous = std::mem::replace(&mut self.entries[slot].data, entry.data);
            self.bytes_written = self.bytes_written - previous.len() as u64 + size;
            return PackOutcome::Replaced;
        }

        self.slots.insert(entry.name.clone(), self.entries.len());
        self.entries.push(entry);
        self.bytes_written += size;
        PackOutcome::Added
    }

    /// Writes every buffered entry and returns the archive bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry or the central directory cannot be
    /// written.
    pub fn finish(self) -> ZipResult<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for entry in &self.entries {
            zip.start_file(entry.name.as_str(), self.options)?;
            zip.write_all(&entry.data)?;
        }
        Ok(zip.finish()?.into_inner())
    }
}

fn zip_datetime(date: NaiveDate) -> Option<DateTime> {
    let year = u16::try_from(date.year()).ok()?;
    let month = u8::try_from(date.month()).ok()?;
    let day = u8::try_from(date.day()).ok()?;
    DateTime::from_date_and_time(year, month, day, 0, 0, 0).ok()
}
