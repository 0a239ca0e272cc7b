use clap::{Args, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::validation::{parse_debounce, parse_indent_level};

/// Available Cartwright subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the game file once
    ///
    /// Extracts the metadata header, bundles the entry and writes the game
    /// file. Exits without launching TIC-80.
    Build(BuildArgs),

    /// Build, launch TIC-80 and rebuild on change
    ///
    /// Watches the project, rebuilds the game file whenever a source file
    /// changes and runs it in TIC-80. Exits with TIC-80's exit status.
    #[command(visible_alias = "watch")]
    Run(RunArgs),
}

/// Options shared by every command that loads a project.
#[derive(Args, Debug, Default, Clone)]
pub struct ProjectArgs {
    /// Path to the config file
    ///
    /// Defaults to cartwright.config.json in the project directory.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project directory
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Minify the bundled script (syntax and whitespace only)
    #[arg(long)]
    pub minify: bool,

    /// Drop code the entry never reaches
    ///
    /// TIC-80 calls TIC, BOOT and friends by name, so only enable this when
    /// those callbacks are referenced from the entry.
    #[arg(long)]
    pub tree_shaking: bool,

    /// Compress the game code in the second pass
    #[arg(long)]
    pub compress: bool,

    /// Mangle local names in the second pass
    #[arg(long)]
    pub mangle: bool,

    /// Indentation width of non-minified output
    #[arg(long, value_name = "N", value_parser = parse_indent_level)]
    pub indent_level: Option<u8>,
}

/// Arguments for the build command
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Quiet period before a burst of file changes triggers a rebuild
    #[arg(long, value_name = "MS", default_value = "100", value_parser = parse_debounce)]
    pub debounce: Duration,
}
