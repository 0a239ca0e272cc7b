//! Cartwright CLI: build TypeScript games for the TIC-80 fantasy console.
//!
//! `cartwright build` turns the configured entry into a game file.
//! `cartwright run` does the same, launches TIC-80 against it and rebuilds on
//! every change until the runtime exits.
//!
//! - [`config`] loads `cartwright.config.json` with figment
//! - [`commands`] implements the two commands
//! - [`watch`] runs build cycles one at a time as files change
//! - [`runtime`] supervises the TIC-80 process and mirrors its exit
//! - [`error`], [`logger`] and [`ui`] are shared plumbing
//!
//! ```rust,no_run
//! use cartwright_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod runtime;
pub mod ui;
pub mod watch;

pub use error::{BuildError, CliError, ConfigError, Result, ResultExt};
