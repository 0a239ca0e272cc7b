//! Configuration system for Cartwright with multi-source loading.
//!
//! Merges settings from CLI args, environment variables, and
//! `cartwright.config.json`. Priority: CLI > Environment > File > Defaults

mod conversions;
mod defaults;
mod loading;
mod tests;
mod types;
mod validation;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use conversions::RuntimeSettings;
pub use defaults::*;
pub use loading::{CONFIG_FILE_NAME, ENV_PREFIX};
pub use types::*;

/// Cartwright configuration, as written in `cartwright.config.json`.
///
/// `entry`, `outfile` and `compression.compressedFile` have no default; a
/// project that leaves one out fails validation with a missing-field error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartConfig {
    /// Game source entry (e.g., "src/main.ts")
    #[serde(default, alias = "entryPath", skip_serializing_if = "Option::is_none")]
    pub entry: Option<PathBuf>,

    /// Intermediate bundled script
    #[serde(default, alias = "outFile", skip_serializing_if = "Option::is_none")]
    pub outfile: Option<PathBuf>,

    /// Syntax/whitespace minification while bundling
    #[serde(default)]
    pub minify: bool,

    /// Dead-code elimination while bundling
    #[serde(default)]
    pub tree_shaking: bool,

    /// TIC-80 runtime settings
    #[serde(default)]
    pub tic: TicSection,

    /// Second-pass minification and the final game file
    #[serde(default)]
    pub compression: CompressionSection,

    /// Game metadata and cartridge handling
    #[serde(default)]
    pub game: GameSection,
}
