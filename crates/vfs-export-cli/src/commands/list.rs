//! List command implementation

use super::build_config;
use super::build_filesystem;
use crate::cli::ListArgs;
use crate::error::convert_list_error;
use crate::output::OutputFormatter;
use anyhow::Result;
use vfs_export_core::list_project_files;

pub async fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let fs = build_filesystem(&args.source)?;
    let config = build_config(&args.source)?;

    let files = list_project_files(&fs, &config)
        .await
        .map_err(|e| convert_list_error(e, &args.source.url))?;

    formatter.format_file_list(&files)
}
