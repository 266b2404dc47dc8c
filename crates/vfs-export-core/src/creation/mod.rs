//! Archive creation from a virtual project tree.
//!
//! [`walker`] enumerates the files to export, [`zip`] packs them in memory,
//! and [`Exporter`] drives both and hands the result to a delivery target.

pub mod exporter;
pub mod filters;
pub mod walker;
pub mod zip;

// Re-exports for public API
pub use exporter::ExportArtifact;
pub use exporter::Exporter;
pub use walker::VirtualWalker;
pub use walker::collect_files;
pub use zip::PackOutcome;
pub use zip::ZipPacker;
