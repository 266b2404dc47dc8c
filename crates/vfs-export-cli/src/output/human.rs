//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use vfs_export_core::ExportReport;
use vfs_export_core::VirtualPath;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_export_result(&self, output_path: &Path, report: &ExportReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Project exported: {}",
                style("✓").green().bold(),
                output_path.display()
            ));
        } else {
            let _ = self
                .term
                .write_line(&format!("Project exported: {}", output_path.display()));
        }

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "  Files added:      {}",
            Self::format_number(report.files_added)
        ));
        let _ = self.term.write_line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_written)
        ));

        if report.bytes_compressed > 0 {
            let _ = self.term.write_line(&format!(
                "  Archive size:     {}",
                Self::format_size(report.bytes_compressed)
            ));
            let _ = self.term.write_line(&format!(
                "  Compression:      {:.1}%",
                report.compression_percentage()
            ));
        }

        if report.has_skipped() {
            let _ = self.term.write_line(&format!(
                "  Files skipped:    {}",
                Self::format_number(report.files_skipped())
            ));
        }

        if self.verbose {
            let _ = self.term.write_line(&format!(
                "  Files discovered: {}",
                Self::format_number(report.files_discovered)
            ));
            let _ = self
                .term
                .write_line(&format!("  Duration:         {:?}", report.duration));

            if report.has_skipped() {
                let _ = self.term.write_line("");
                let _ = self.term.write_line("Skipped:");
                for skipped in &report.skipped {
                    let _ = self
                        .term
                        .write_line(&format!("  - {}: {}", skipped.path, skipped.reason));
                }
            }
        }

        Ok(())
    }

    fn format_file_list(&self, files: &[VirtualPath]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for file in files {
            let _ = self.term.write_line(file.as_str());
        }

        if self.verbose {
            let _ = self.term.write_line("");
            let _ = self.term.write_line(&format!(
                "Total: {} files",
                Self::format_number(files.len())
            ));
        }

        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("WARNING: {message}"));
        }
    }
}
