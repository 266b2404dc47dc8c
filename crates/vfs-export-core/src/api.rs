//! High-level public API for project export.

use crate::ExportConfig;
use crate::ExportReport;
use crate::Result;
use crate::creation::Exporter;
use crate::delivery::Delivery;
use crate::fs::FileSystem;
use crate::types::VirtualPath;

/// Exports a project tree as a ZIP archive and delivers it.
///
/// The archive is named `<prefix>-YYYY-MM-DD.zip` after today's UTC date.
///
/// # Arguments
///
/// * `fs` - Filesystem holding the project
/// * `delivery` - Target receiving the finished archive
/// * `config` - Export configuration
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - Any directory listing fails
/// - The archive cannot be written
/// - Delivery fails
///
/// Files that cannot be read are skipped and listed in the report instead.
///
/// # Examples
///
/// ```no_run
/// use vfs_export_core::ExportConfig;
/// use vfs_export_core::delivery::DirectoryHost;
/// use vfs_export_core::delivery::ObjectUrlDelivery;
/// use vfs_export_core::export_project;
/// use vfs_export_core::fs::HttpFileSystem;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let fs = HttpFileSystem::new("http://localhost:5173")?;
/// let mut delivery = ObjectUrlDelivery::new(DirectoryHost::new("downloads"));
/// let report = export_project(&fs, &mut delivery, &ExportConfig::default()).await?;
/// println!("Saved {} with {} files", report.filename, report.files_added);
/// # Ok(())
/// # }
/// ```
pub async fn export_project<F, D>(
    fs: &F,
    delivery: &mut D,
    config: &ExportConfig,
) -> Result<ExportReport>
where
    F: FileSystem + ?Sized,
    D: Delivery + ?Sized,
{
    Exporter::new(fs)
        .with_config(config.clone())
        .export(delivery)
        .await
}

/// Lists the files an export would include, in archive order.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or any directory listing
/// fails.
///
/// # Examples
///
/// ```
/// use vfs_export_core::ExportConfig;
/// use vfs_export_core::fs::MemoryFileSystem;
/// use vfs_export_core::list_project_files;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fs = MemoryFileSystem::new()
///     .with_file("/src/a.ts", b"")?
///     .with_file("/.env", b"")?;
///
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let files = runtime.block_on(list_project_files(&fs, &ExportConfig::default()))?;
/// assert_eq!(files.len(), 1);
/// # Ok(())
/// # }
/// ```
pub async fn list_project_files<F>(fs: &F, config: &ExportConfig) -> Result<Vec<VirtualPath>>
where
    F: FileSystem + ?Sized,
{
    Exporter::new(fs)
        .with_config(config.clone())
        .list_files()
        .await
}
