//! vfs-export CLI - Command-line utility for exporting a virtual project
//! filesystem as a dated ZIP archive.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod progress;

use clap::Parser;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let show_progress = !cli.quiet && !cli.json;

    let (operation, result) = match &cli.command {
        cli::Commands::Export(args) => (
            "export",
            commands::export::execute(args, &*formatter, show_progress).await,
        ),
        cli::Commands::List(args) => ("list", commands::list::execute(args, &*formatter).await),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            ("completion", Ok(()))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(operation, &err);
            ExitCode::FAILURE
        }
    }
}
