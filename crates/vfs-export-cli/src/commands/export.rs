//! Export command implementation

use super::build_config;
use super::build_filesystem;
use crate::cli::ExportArgs;
use crate::error::convert_export_error;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use std::path::PathBuf;
use vfs_export_core::Exporter;
use vfs_export_core::delivery::DirectoryHost;
use vfs_export_core::delivery::ObjectUrlDelivery;

pub async fn execute(
    args: &ExportArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let fs = build_filesystem(&args.source)?;

    let mut config = build_config(&args.source)?.with_max_file_size(args.max_file_size);
    if let Some(level) = args.compression_level {
        config = config.with_compression_level(level);
    }
    if let Some(name) = &args.name {
        config = config.with_filename_prefix(name.as_str());
    }

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let host = DirectoryHost::new(&output_dir).with_overwrite(args.force);
    let mut delivery = ObjectUrlDelivery::new(host);

    let exporter = Exporter::new(fs).with_config(config);
    let result = if show_progress && CliProgress::should_show() {
        let mut progress = CliProgress::new("Exporting");
        exporter
            .export_with_progress(&mut delivery, &mut progress)
            .await
    } else {
        exporter.export(&mut delivery).await
    };
    let report = result.map_err(|e| convert_export_error(e, &args.source.url))?;

    let output_path = delivery
        .host()
        .saved_paths()
        .last()
        .cloned()
        .unwrap_or_else(|| output_dir.join(&report.filename));
    formatter.format_export_result(&output_path, &report)?;

    if report.has_skipped() {
        formatter.format_warning(&format!(
            "{} file(s) could not be read and were left out of the archive",
            report.files_skipped()
        ));
    }

    Ok(())
}
