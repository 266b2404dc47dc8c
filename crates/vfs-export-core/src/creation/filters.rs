//! Entry exclusion rules for project export.
//!
//! Rules are evaluated on a single entry *name*, never on the full path, so a
//! directory such as `.cache` is pruned at any depth.

use crate::config::ExportConfig;

/// Checks if an entry should be skipped based on configuration.
///
/// An entry is skipped if:
/// - Its name starts with `.` and `include_hidden` is false
/// - Its name matches an exclude pattern
///
/// # Examples
///
/// ```
/// use vfs_export_core::ExportConfig;
/// use vfs_export_core::creation::filters;
///
/// let config = ExportConfig::default();
/// assert!(filters::should_skip("node_modules", &config));
/// assert!(filters::should_skip(".git", &config));
/// assert!(filters::should_skip("dist", &config));
/// assert!(filters::should_skip(".cache", &config));
///
/// assert!(!filters::should_skip("src", &config));
/// assert!(!filters::should_skip("distribution", &config));
/// ```
#[must_use]
pub fn should_skip(name: &str, config: &ExportConfig) -> bool {
    if !config.include_hidden && is_hidden(name) {
        return true;
    }

    config
        .exclude_patterns
        .iter()
        .any(|pattern| pattern_matches(name, pattern))
}

/// Checks if an entry name is hidden (starts with '.').
///
/// # Examples
///
/// ```
/// use vfs_export_core::creation::filters;
///
/// assert!(filters::is_hidden(".gitignore"));
/// assert!(!filters::is_hidden("visible.txt"));
/// ```
#[must_use]
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Matches an entry name against a simple glob pattern.
///
/// Supports:
/// - Exact match: `"dist"` matches only `dist`
/// - Extension wildcard: `"*.log"` matches names ending with `.log`
/// - Prefix wildcard: `"temp*"` matches names starting with `temp`
///
/// # Examples
///
/// ```
/// use vfs_export_core::creation::filters;
///
/// assert!(filters::pattern_matches("dist", "dist"));
/// assert!(filters::pattern_matches("debug.log", "*.log"));
/// assert!(filters::pattern_matches("temp_file", "temp*"));
/// assert!(!filters::pattern_matches("file_temp", "temp*"));
/// ```
#[must_use]
pub fn pattern_matches(name: &str, pattern: &str) -> bool {
    if pattern == name {
        return true;
    }

    if let Some(prefix) = pattern.strip_suffix('*') {
        return name.starts_with(prefix);
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        return name.ends_with(suffix);
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_excluded_names() {
        let config = ExportConfig::default();
        assert!(should_skip("node_modules", &config));
        assert!(should_skip(".git", &config));
        assert!(should_skip("dist", &config));
    }

    #[test]
    fn test_exact_names_only() {
        let config = ExportConfig::default();
        assert!(!should_skip("node_modules_backup", &config));
        assert!(!should_skip("my_dist", &config));
        assert!(!should_skip("dist.ts", &config));
        assert!(!should_skip("git", &config));
    }

    #[test]
    fn test_is_hidden_dotfiles() {
        assert!(is_hidden(".gitignore"));
        assert!(is_hidden(".env"));
        assert!(is_hidden(".cache"));
        assert!(is_hidden("."));
    }

    #[test]
    fn test_is_hidden_regular_names() {
        assert!(!is_hidden("main.rs"));
        assert!(!is_hidden("README.md"));
        assert!(!is_hidden("file.txt"));
        assert!(!is_hidden(""));
    }

    #[test]
    fn test_should_skip_hidden_files() {
        let config = ExportConfig::default();
        assert!(should_skip(".gitignore", &config));
        assert!(should_skip(".env", &config));
        assert!(should_skip(".vscode", &config));
    }

    #[test]
    fn test_should_skip_include_hidden() {
        let config = ExportConfig::default().with_include_hidden(true);
        assert!(!should_skip(".gitignore", &config));
        assert!(!should_skip(".env", &config));
        // Explicit patterns still apply
        assert!(should_skip(".git", &config));
    }

    #[test]
    fn test_should_skip_normal_names() {
        let config = ExportConfig::default();
        assert!(!should_skip("main.rs", &config));
        assert!(!should_skip("README.md", &config));
        assert!(!should_skip("src", &config));
        assert!(!should_skip("package.json", &config));
    }

    #[test]
    fn test_should_skip_combines_rules() {
        let config = ExportConfig::default()
            .with_exclude_patterns(vec!["*.log".to_string(), "temp*".to_string()])
            .with_include_hidden(false);

        assert!(should_skip(".hidden", &config));
        assert!(should_skip("debug.log", &config));
        assert!(should_skip("temp_file", &config));
        assert!(!should_skip("main.rs", &config));
        // Replaced patterns drop the defaults
        assert!(!should_skip("dist", &config));
    }

    #[test]
    fn test_pattern_matches_exact() {
        assert!(pattern_matches("test", "test"));
        assert!(pattern_matches(".git", ".git"));
        assert!(!pattern_matches("test1", "test"));
        assert!(!pattern_matches(".github", ".git"));
    }

    #[test]
    fn test_pattern_matches_prefix_wildcard() {
        assert!(pattern_matches("test", "test*"));
        assert!(pattern_matches("testing", "test*"));
        assert!(!pattern_matches("atest", "test*"));
    }

    #[test]
    fn test_pattern_matches_suffix_wildcard() {
        assert!(pattern_matches("test.txt", "*.txt"));
        assert!(pattern_matches(".txt", "*.txt"));
        assert!(!pattern_matches("txt", "*.txt"));
        assert!(!pattern_matches("test.rs", "*.txt"));
    }
}
