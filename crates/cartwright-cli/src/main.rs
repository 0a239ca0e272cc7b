//! Cartwright command-line entry point.

use cartwright_cli::{cli, commands, error, logger, runtime, ui};
use clap::Parser;
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Build(build_args) => commands::build_execute(build_args).await.map(|()| None),
        cli::Command::Run(run_args) => commands::run_execute(run_args).await,
    };

    match result {
        Ok(Some(disposition)) => runtime::propagate_exit(disposition),
        Ok(None) => Ok(()),
        Err(err) if err.is_graceful() => {
            ui::warning(&err.to_string());
            Ok(())
        }
        Err(err) => Err(error::cli_error_to_miette(err)),
    }
}
