//! Command-line interface definition for Cartwright.
//!
//! # Command Structure
//!
//! - `cartwright build` - Build the game file once
//! - `cartwright run` - Build, launch TIC-80 and rebuild on every change

mod commands;
mod validation;

use clap::Parser;

pub use commands::{BuildArgs, Command, ProjectArgs, RunArgs};
pub use validation::{parse_debounce, parse_indent_level};

/// Cartwright - TypeScript game builds for the TIC-80 fantasy console
#[derive(Parser, Debug)]
#[command(
    name = "cartwright",
    version,
    about = "Build and live-run TypeScript games on TIC-80",
    long_about = "Cartwright bundles a TypeScript or JavaScript game into a single TIC-80\n\
                  game file, keeps the cartridge metadata header intact, and can launch\n\
                  TIC-80 on the result while rebuilding on every source change."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
