//! Export a virtual project filesystem as a single ZIP download.
//!
//! `vfs-export-core` walks a project tree served by an in-browser development
//! server (or any other [`fs::FileSystem`]), skips dependency, build and
//! hidden directories, packs the remaining files into an in-memory ZIP archive
//! and hands it to a [`delivery::Delivery`] target under a dated filename.
//!
//! # Examples
//!
//! ```no_run
//! use vfs_export_core::ExportConfig;
//! use vfs_export_core::delivery::DirectoryHost;
//! use vfs_export_core::delivery::ObjectUrlDelivery;
//! use vfs_export_core::export_project;
//! use vfs_export_core::fs::HttpFileSystem;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let fs = HttpFileSystem::new("http://localhost:5173")?;
//! let mut delivery = ObjectUrlDelivery::new(DirectoryHost::new("."));
//! let report = export_project(&fs, &mut delivery, &ExportConfig::default()).await?;
//! println!("Exported {} files to {}", report.files_added, report.filename);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod clock;
pub mod config;
pub mod creation;
pub mod delivery;
pub mod error;
pub mod fs;
pub mod report;
pub mod types;

// Re-export main API types
pub use api::export_project;
pub use api::list_project_files;
pub use config::ExportConfig;
pub use creation::ExportArtifact;
pub use creation::Exporter;
pub use error::ExportError;
pub use error::Result;
pub use report::ExportReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use report::SkippedFile;

// Re-export types module for easier access
pub use types::DirEntry;
pub use types::EntryKind;
pub use types::VirtualPath;
