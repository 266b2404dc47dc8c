//! Project export orchestration.

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::clock::export_filename;
use crate::config::ExportConfig;
use crate::creation::walker::VirtualWalker;
use crate::creation::zip::PackOutcome;
use crate::creation::zip::ZipPacker;
use crate::delivery::Delivery;
use crate::error::FsError;
use crate::error::Result;
use crate::fs::FileSystem;
use crate::report::ExportReport;
use crate::report::NoopProgress;
use crate::report::ProgressCallback;
use crate::types::ArchiveEntry;
use crate::types::FileRecord;
use crate::types::VirtualPath;
use std::time::Instant;
use tracing::debug;
use tracing::info;
use tracing::trace;
use tracing::warn;

type Skipped = (VirtualPath, String);

/// A finished archive that has not been delivered yet.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// Archive bytes.
    pub data: Vec<u8>,
    /// Filename the archive should be saved under.
    pub filename: String,
    /// Statistics gathered while building the archive.
    pub report: ExportReport,
}

/// Exports a virtual project tree as a single ZIP download.
///
/// The exporter walks the tree from the configured root, reads every kept
/// file, packs the files into an in-memory archive named
/// `<prefix>-YYYY-MM-DD.zip` and hands it to a [`Delivery`].
///
/// Files that cannot be read are skipped and listed in the report; only a
/// failed enumeration, archive or delivery step fails the export.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use vfs_export_core::Exporter;
/// use vfs_export_core::clock::FixedClock;
/// use vfs_export_core::fs::MemoryFileSystem;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fs = MemoryFileSystem::new().with_file("/src/a.ts", b"export {}")?;
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).ok_or("date")?;
/// let exporter = Exporter::new(fs).with_clock(FixedClock::new(date));
///
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let artifact = runtime.block_on(exporter.build())?;
///
/// assert_eq!(artifact.filename, "project-2024-03-15.zip");
/// assert_eq!(artifact.report.files_added, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Exporter<F, C = SystemClock> {
    fs: F,
    config: ExportConfig,
    clock: C,
}

impl<F: FileSystem> Exporter<F> {
    /// Creates an exporter over `fs` with default settings and the system
    /// clock.
    #[must_use]
    pub fn new(fs: F) -> Self {
        Self {
            fs,
            config: ExportConfig::default(),
            clock: SystemClock,
        }
    }
}

impl<F: FileSystem, C: Clock> Exporter<F, C> {
    /// Sets the full configuration.
    #[must_use]
    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the date source used for the filename and entry timestamps.
    #[must_use]
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Exporter<F, C2> {
        Exporter {
            fs: self.fs,
            config: self.config,
            clock,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Returns the underlying filesystem.
    #[must_use]
    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    /// Lists the files an export would include, without reading them.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or any directory
    /// listing fails.
    pub async fn list_files(&self) -> Result<Vec<VirtualPath>> {
        self.config.validate()?;
        let files = VirtualWalker::new(&self.fs, &self.config)
            .list_files(&self.config.root)
            .await?;
        Ok(files)
    }

    /// Builds the archive without delivering it.
    ///
    /// # Errors
    ///
    /// See [`Exporter::build_with_progress`].
    pub async fn build(&self) -> Result<ExportArtifact> {
        self.build_with_progress(&mut NoopProgress).await
    }

    /// Builds the archive without delivering it, reporting progress.
    ///
    /// Entries are added in discovery order. When two files map to the same
    /// archive name, the entry keeps its first position and the content read
    /// last.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the configuration is invalid
    /// - enumeration fails
    /// - the archive cannot be written
    pub async fn build_with_progress(
        &self,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExportArtifact> {
        let start = Instant::now();
        let files = self.list_files().await?;

        let today = self.clock.today();
        let mut packer = ZipPacker::new(self.config.compression_level, Some(today));
        let mut report = ExportReport::new();
        report.files_discovered = files.len();

        let total = files.len();
        for (index, path) in files.into_iter().enumerate() {
            progress.on_entry_start(path.as_str(), total, index + 1);

            let record = match self.read_record(path).await {
                Ok(record) => record,
                Err((path, reason)) => {
                    warn!(path = %path, reason = %reason, "skipping file");
                    progress.on_entry_skipped(path.as_str(), &reason);
                    report.add_skipped(path, reason);
                    continue;
                }
            };

            let path = record.path.clone();
            let size = record.content.len() as u64;
            match packer.add(ArchiveEntry::from(record)) {
                PackOutcome::Added => {
                    trace!(path = %path, bytes = size, "added file");
                    report.files_added += 1;
                }
                PackOutcome::Replaced => {
                    debug!(path = %path, bytes = size, "replaced earlier entry with the same name");
                }
            }
            progress.on_bytes_written(size);
            progress.on_entry_complete(path.as_str());
        }

        report.bytes_written = packer.bytes_written();
        let data = packer.finish()?;
        report.bytes_compressed = data.len() as u64;
        report.filename = export_filename(&self.config.filename_prefix, today);
        report.duration = start.elapsed();

        Ok(ExportArtifact {
            data,
            filename: report.filename.clone(),
            report,
        })
    }

    /// Builds the archive and hands it to `delivery`.
    ///
    /// # Errors
    ///
    /// See [`Exporter::export_with_progress`].
    pub async fn export<D: Delivery + ?Sized>(&self, delivery: &mut D) -> Result<ExportReport> {
        self.export_with_progress(delivery, &mut NoopProgress).await
    }

    /// Builds the archive and hands it to `delivery`, reporting progress.
    ///
    /// `delivery` is never called when building fails.
    ///
    /// # Errors
    ///
    /// Returns an error if building fails (see
    /// [`Exporter::build_with_progress`]) or the archive cannot be delivered.
    pub async fn export_with_progress<D: Delivery + ?Sized>(
        &self,
        delivery: &mut D,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExportReport> {
        let ExportArtifact {
            data,
            filename,
            mut report,
        } = self.build_with_progress(progress).await?;

        let start = Instant::now();
        delivery.deliver(data, &filename)?;
        report.duration += start.elapsed();

        info!(
            filename = %report.filename,
            files = report.files_added,
            skipped = report.files_skipped(),
            bytes = report.bytes_compressed,
            "export complete"
        );
        progress.on_complete();
        Ok(report)
    }

    /// Reads one file, or returns it with the reason it was skipped.
    async fn read_record(&self, path: VirtualPath) -> std::result::Result<FileRecord, Skipped> {
        let content = match self.fs.read_file(&path).await {
            Ok(content) => content,
            Err(e) => return Err((path, read_failure(&e))),
        };

        if let Some(max) = self.config.max_file_size
            && content.len() as u64 > max
        {
            let reason = format!("file size {} exceeds maximum of {max} bytes", content.len());
            return Err((path, reason));
        }

        Ok(FileRecord { path, content })
    }
}

fn read_failure(err: &FsError) -> String {
    let message = err.to_string();
    if message.is_empty() {
        "read failed".to_string()
    } else {
        message
    }
}
