//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use vfs_export_core::ExportReport;
use vfs_export_core::VirtualPath;

pub struct JsonFormatter;

#[derive(Serialize)]
struct SkippedOutput {
    path: String,
    reason: String,
}

#[derive(Serialize)]
struct ExportOutput {
    filename: String,
    output_path: String,
    files_discovered: usize,
    files_added: usize,
    files_skipped: usize,
    bytes_written: u64,
    bytes_compressed: u64,
    compression_ratio: f64,
    compression_percentage: f64,
    duration_ms: u128,
    skipped: Vec<SkippedOutput>,
}

impl ExportOutput {
    fn new(output_path: &Path, report: &ExportReport) -> Self {
        Self {
            filename: report.filename.clone(),
            output_path: output_path.display().to_string(),
            files_discovered: report.files_discovered,
            files_added: report.files_added,
            files_skipped: report.files_skipped(),
            bytes_written: report.bytes_written,
            bytes_compressed: report.bytes_compressed,
            compression_ratio: report.compression_ratio(),
            compression_percentage: report.compression_percentage(),
            duration_ms: report.duration.as_millis(),
            skipped: report
                .skipped
                .iter()
                .map(|s| SkippedOutput {
                    path: s.path.to_string(),
                    reason: s.reason.clone(),
                })
                .collect(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_export_result(&self, output_path: &Path, report: &ExportReport) -> Result<()> {
        let output = JsonOutput::success("export", ExportOutput::new(output_path, report));
        Self::output(&output)
    }

    fn format_file_list(&self, files: &[VirtualPath]) -> Result<()> {
        #[derive(Serialize)]
        struct ListOutput {
            total: usize,
            files: Vec<String>,
        }

        let data = ListOutput {
            total: files.len(),
            files: files.iter().map(ToString::to_string).collect(),
        };

        let output = JsonOutput::success("list", data);
        Self::output(&output)
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::error(operation, format!("{error:?}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, _message: &str) {
        // Skipped files are already part of the result document.
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_export_output_structure() {
        let mut report = ExportReport::new();
        report.filename = "project-2024-03-15.zip".to_string();
        report.files_added = 2;
        report.bytes_written = 100;
        report.bytes_compressed = 50;
        report.add_skipped(VirtualPath::parse("/b.bin").unwrap(), "status 500");

        let output = JsonOutput::success(
            "export",
            ExportOutput::new(Path::new("out/project-2024-03-15.zip"), &report),
        );
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["operation"], "export");
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["filename"], "project-2024-03-15.zip");
        assert_eq!(json["data"]["files_added"], 2);
        assert_eq!(json["data"]["files_skipped"], 1);
        assert_eq!(json["data"]["skipped"][0]["path"], "/b.bin");
        assert_eq!(json["data"]["compression_ratio"], 2.0);
    }
}
