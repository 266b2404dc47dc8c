//! Subcommand implementations.

pub mod completion;
pub mod export;
pub mod list;

use crate::cli::SourceArgs;
use crate::error::convert_fs_error;
use anyhow::Context;
use anyhow::Result;
use std::time::Duration;
use vfs_export_core::ExportConfig;
use vfs_export_core::VirtualPath;
use vfs_export_core::fs::HttpFileSystem;

/// Builds the HTTP accessor for the source options.
fn build_filesystem(source: &SourceArgs) -> Result<HttpFileSystem> {
    HttpFileSystem::builder(source.url.as_str())
        .prefix(source.prefix.as_str())
        .timeout(Duration::from_secs(source.timeout))
        .build()
        .map_err(|e| convert_fs_error(e, &source.url))
}

/// Builds the traversal part of the export configuration.
///
/// Exclude patterns given on the command line extend the defaults.
fn build_config(source: &SourceArgs) -> Result<ExportConfig> {
    let mut root = source.root.clone();
    if !root.starts_with('/') {
        root.insert(0, '/');
    }
    if !root.ends_with('/') {
        root.push('/');
    }
    let root = VirtualPath::parse(&root)
        .with_context(|| format!("Invalid --root '{}'", source.root))?;

    let config = source.exclude.iter().fold(
        ExportConfig::default()
            .with_root(root)
            .with_include_hidden(source.include_hidden),
        |config, pattern| config.with_exclude(pattern.as_str()),
    );
    Ok(config)
}
