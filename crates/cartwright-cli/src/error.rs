//! Error handling for the Cartwright CLI.
//!
//! `CliError` wraps the domain errors (`ConfigError`, `BuildError` and the
//! pipeline's own error) through `#[from]`, and [`ResultExt`] adds paths,
//! hints or a prefix on the way up.
//!
//! Configuration problems that only mean "nothing to do yet" are *graceful*:
//! the CLI prints them and exits with status 0. See [`CliError::is_graceful`].
//!
//! # Example
//!
//! ```rust,no_run
//! use cartwright_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_entry(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_path(path)
//!         .with_hint("Check the 'entry' field in cartwright.config.json")
//! }
//! ```

mod miette;

pub use self::miette::{bundler_error_to_miette, cli_error_to_miette};

use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (file not found, invalid syntax, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Build process errors outside the bundler itself
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Errors from the build pipeline
    #[error("{0}")]
    Bundler(#[from] cartwright_bundler::Error),

    /// The runtime executable could not be started
    #[error("Failed to launch {}: {source}\n\nHint: Check 'tic.ticExecutable' in your config", .executable.display())]
    Launch {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The game file lives where the runtime's file system cannot see it
    #[error("Game file {} is outside the TIC-80 file system {}\n\nHint: Point 'compression.compressedFile' inside the project directory", .artifact.display(), .fs_root.display())]
    ArtifactOutsideRoot { artifact: PathBuf, fs_root: PathBuf },

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File watching errors
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

impl CliError {
    /// Whether this error should end the process with status 0.
    ///
    /// A project without its required config keys cannot be built, but that
    /// is a setup state, not a failure.
    pub fn is_graceful(&self) -> bool {
        matches!(self, CliError::Config(ConfigError::MissingField { .. }))
    }
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file doesn't exist at the given location
    #[error("Config file not found: {}\n\nHint: Create a cartwright.config.json file or specify --config <path>", .0.display())]
    NotFound(PathBuf),

    /// Config file could not be parsed or merged
    #[error("Invalid config: {0}\n\nHint: Check the JSON syntax and field types")]
    Invalid(String),

    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField {
        /// Name of the missing field, dotted for nested sections
        field: String,
        /// Helpful hint for providing the field
        hint: String,
    },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

/// Build process errors raised by the CLI around the pipeline.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Entry point file doesn't exist
    #[error("Entry point not found: {}\n\nHint: Check the 'entry' field in cartwright.config.json", .0.display())]
    EntryNotFound(PathBuf),

    /// Output directory could not be created or written
    #[error("Output directory is not writable: {}\n\nHint: Check directory permissions or change 'outfile' / 'compression.compressedFile'", .0.display())]
    OutputNotWritable(PathBuf),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Attach context to any error convertible into [`CliError`].
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a `Hint:` line.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the message, `"<msg>: <error>"`.
    ///
    /// ```rust,no_run
    /// # use cartwright_cli::error::{Result, ResultExt};
    /// # fn run() -> Result<()> {
    /// std::fs::remove_file("game.js").context("Cannot replace game.js")?;
    /// # Ok(())
    /// # }
    /// ```
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            match err {
                CliError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                    CliError::FileNotFound(path.as_ref().to_path_buf())
                }
                other => other,
            }
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{err}\n\nHint: {hint}"))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{msg}: {err}"))
        })
    }
}
