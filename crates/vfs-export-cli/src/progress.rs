//! Progress bar implementation for CLI operations.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressState;
use indicatif::ProgressStyle;
use std::fmt::Write;
use vfs_export_core::ProgressCallback;

/// CLI progress bar wrapper implementing `ProgressCallback`.
///
/// Displays a progress bar with file count, bytes packed and ETA when
/// running in a TTY. The file total is only known once enumeration is done,
/// so the bar length is set by the first entry. Automatically cleans up on
/// drop.
pub struct CliProgress {
    bar: ProgressBar,
    bytes_written: u64,
}

impl CliProgress {
    /// Creates a new CLI progress bar.
    ///
    /// # Arguments
    ///
    /// * `message` - Message to display (e.g., "Exporting")
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new(0);

        // Template: "Exporting [████████░░░░] 42/100 files (3s) 15.2 KB /src/a.ts"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix} [{bar:40.cyan/blue}] {pos}/{len} files ({eta}) {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .with_key("eta", |state: &ProgressState, w: &mut dyn Write| {
                    write!(w, "{}", humanize_duration(state.eta())).unwrap_or(());
                })
                .progress_chars("█▓░"),
        );

        bar.set_prefix(message.to_string());

        Self {
            bar,
            bytes_written: 0,
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stderr().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_entry_start(&mut self, path: &str, total: usize, _current: usize) {
        self.bar.set_length(total as u64);
        self.bar
            .set_message(format!("{} {path}", humanize_bytes(self.bytes_written)));
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes_written += bytes;
    }

    fn on_entry_complete(&mut self, _path: &str) {
        self.bar.inc(1);
    }

    fn on_entry_skipped(&mut self, _path: &str, _reason: &str) {
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Converts bytes to human-readable format (KB, MB, GB, TB).
fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Converts duration to human-readable format.
fn humanize_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 {
        format!("{}h{}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m{}s", secs / 60, secs % 60)
    } else {
        format!("{secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_bytes() {
        assert_eq!(humanize_bytes(0), "0 B");
        assert_eq!(humanize_bytes(512), "512 B");
        assert_eq!(humanize_bytes(1536), "1.5 KB");
        assert_eq!(humanize_bytes(1024 * 1024), "1.0 MB");
        assert_eq!(humanize_bytes(1024_u64.pow(4)), "1.0 TB");
    }

    #[test]
    fn test_humanize_duration() {
        assert_eq!(humanize_duration(std::time::Duration::from_secs(0)), "0s");
        assert_eq!(
            humanize_duration(std::time::Duration::from_secs(90)),
            "1m30s"
        );
        assert_eq!(
            humanize_duration(std::time::Duration::from_secs(3661)),
            "1h1m"
        );
    }

    #[test]
    fn test_progress_callback() {
        let mut progress = CliProgress::new("Testing");

        progress.on_entry_start("/src/a.ts", 2, 1);
        progress.on_bytes_written(1024);
        progress.on_entry_complete("/src/a.ts");
        progress.on_entry_start("/src/b.ts", 2, 2);
        progress.on_entry_skipped("/src/b.ts", "status 500");

        assert_eq!(progress.bytes_written, 1024);
        assert_eq!(progress.bar.position(), 2);
        assert_eq!(progress.bar.length(), Some(2));
    }
}
