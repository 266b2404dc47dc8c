//! Date source for export filenames.

use chrono::NaiveDate;
use chrono::Utc;

/// Supplies the current calendar date.
pub trait Clock: Send + Sync {
    /// Returns today's date.
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time, reporting the UTC date.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock that always reports the same date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use vfs_export_core::clock::Clock;
/// use vfs_export_core::clock::FixedClock;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// assert_eq!(FixedClock::new(date).today(), date);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(NaiveDate);

impl FixedClock {
    /// Creates a clock fixed at `date`.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Builds the archive filename `<prefix>-YYYY-MM-DD.zip`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use vfs_export_core::clock::export_filename;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// assert_eq!(export_filename("project", date), "project-2024-03-15.zip");
/// ```
#[must_use]
pub fn export_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}-{}.zip", date.format("%Y-%m-%d"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_zero_pads() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        assert_eq!(export_filename("project", date), "project-2025-01-02.zip");
    }

    #[test]
    fn test_fixed_clock() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let clock = FixedClock::new(date);
        assert_eq!(export_filename("project", clock.today()), "project-2024-03-15.zip");
    }

    #[test]
    fn test_system_clock_is_utc_today() {
        let before = Utc::now().date_naive();
        let today = SystemClock.today();
        let after = Utc::now().date_naive();
        assert!(today >= before && today <= after);
    }
}
