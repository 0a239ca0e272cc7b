//! # cartwright-bundler
//!
//! Build pipeline that turns a TypeScript or JavaScript game project into a
//! single TIC-80 game file.
//!
//! A build cycle runs three stages in order:
//!
//! 1. [`metadata`] reads the entry source and keeps the `// key: value`
//!    comment lines the runtime understands.
//! 2. [`compiler`] bundles the entry and everything it imports into one
//!    script (Rolldown behind the [`Bundler`] trait).
//! 3. [`assembler`] cleans the bundled script, optionally minifies it a second
//!    time and writes `header + code` to the artifact.
//!
//! [`BuildPipeline`] wires the stages together.
//!
//! ```no_run
//! use std::sync::Arc;
//! use cartwright_bundler::{BuildConfig, BuildPipeline, OxcMinifier, RolldownBundler};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BuildConfig::new("src/main.ts", "build/bundle.js", "build/game.js");
//! let minifier = Arc::new(OxcMinifier);
//! let pipeline = BuildPipeline::new(
//!     config,
//!     Arc::new(RolldownBundler::new(minifier.clone())),
//!     minifier,
//! );
//! let report = pipeline.run_cycle().await?;
//! println!("wrote {}", report.artifact.path.display());
//! # Ok(()) }
//! ```

pub mod assembler;
pub mod compiler;
pub mod config;
pub mod diagnostics;
pub mod metadata;
pub mod minify;
pub mod pipeline;
pub mod retry;

use std::path::PathBuf;

pub use assembler::{AssembleReport, GameFileAssembler, MIN_CODE_LEN, STRICT_MODE_PRAGMA};
pub use compiler::{BundleReport, BundleRequest, Bundler, RolldownBundler};
pub use config::{BuildConfig, CompressionOptions, GameInfo};
pub use diagnostics::{CompileDiagnostic, DiagnosticKind};
pub use metadata::{METADATA_KEYS, MetadataHeader};
pub use minify::{MinifyOptions, Minifier, OxcMinifier};
pub use pipeline::{BuildOutcome, BuildPipeline, CycleReport, TIC_EXECUTABLE_KEY};
pub use retry::{RetryPolicy, read_with_retry};

/// Error types for cartwright-bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The bundler rejected the sources (type errors, syntax errors,
    /// unresolved imports).
    #[error("Compile error: {}", format_diagnostics(.diagnostics))]
    Compile { diagnostics: Vec<CompileDiagnostic> },

    /// The entry file could not be read.
    #[error("Cannot read entry file {path}: {source}")]
    EntryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bundled script never became readable within the retry budget.
    #[error("Bundled output {path} unavailable after {attempts} attempts")]
    ArtifactUnavailable { path: PathBuf, attempts: u32 },

    /// The second-pass minifier could not process the bundled script.
    #[error("Minify error: {0}")]
    Minify(String),

    /// I/O error with context message.
    #[error("{message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for cartwright-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a compile error from a Rolldown error.
    pub fn from_rolldown_batch(error: &dyn std::fmt::Debug) -> Self {
        Error::Compile {
            diagnostics: diagnostics::extract_from_rolldown_error(error),
        }
    }

    /// Wrap an I/O error with a message naming the file involved.
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Error::IoError {
            message: message.into(),
            source,
        }
    }

    /// Whether this error came from the user's sources rather than the
    /// environment.
    pub fn is_compile_error(&self) -> bool {
        matches!(self, Error::Compile { .. })
    }
}

fn format_diagnostics(diagnostics: &[CompileDiagnostic]) -> String {
    match diagnostics {
        [] => "unknown bundler error".to_string(),
        [single] => single.to_string(),
        many => format!(
            "{} errors: {}",
            many.len(),
            many.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        ),
    }
}
