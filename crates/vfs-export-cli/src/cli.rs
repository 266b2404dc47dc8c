//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vfs-export")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export a project as a dated ZIP archive
    Export(ExportArgs),
    /// List the files an export would include
    List(ListArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

/// Options selecting the project tree to read.
#[derive(clap::Args)]
pub struct SourceArgs {
    /// Base URL of the development server
    #[arg(value_name = "URL")]
    pub url: String,

    /// Path the filesystem endpoint is mounted under
    #[arg(long, value_name = "PREFIX", default_value = vfs_export_core::fs::http::DEFAULT_PREFIX)]
    pub prefix: String,

    /// Directory to export, relative to the project root
    #[arg(long, value_name = "PATH", default_value = "/")]
    pub root: String,

    /// Exclude pattern (exact name, prefix* or *suffix; can be repeated)
    #[arg(long = "exclude", short = 'x', value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Include hidden files and directories
    #[arg(long)]
    pub include_hidden: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value = "30", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,
}

#[derive(clap::Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory to save the archive in (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Compression level (1-9)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub compression_level: Option<u8>,

    /// Archive name prefix, completed with the current date
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Skip files larger than this size (supports K, M, G, T suffixes)
    #[arg(long, value_parser = parse_byte_size)]
    pub max_file_size: Option<u64>,

    /// Overwrite an existing archive with the same name
    #[arg(short = 'f', long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Parse byte size with optional suffix (K, M, G, T)
#[allow(clippy::option_if_let_else)]
fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty byte size".to_string());
    }

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('T') {
        (stripped, 1024_u64.pow(4))
    } else if let Some(stripped) = s.strip_suffix('G') {
        (stripped, 1024_u64.pow(3))
    } else if let Some(stripped) = s.strip_suffix('M') {
        (stripped, 1024_u64.pow(2))
    } else if let Some(stripped) = s.strip_suffix('K') {
        (stripped, 1024)
    } else {
        (s, 1)
    };

    num_str
        .parse::<u64>()
        .map_err(|_| format!("invalid byte size: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("byte size overflow: {s}"))
        })
}
