//! Build configuration consumed by the pipeline.
//!
//! This is the validated, path-resolved form. Loading it from
//! `cartwright.config.json` is the CLI's job.

use std::path::{Path, PathBuf};

/// Second-pass minification settings applied to the game file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionOptions {
    pub compress: bool,
    pub mangle: bool,
    pub indent_level: u8,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            compress: false,
            mangle: false,
            indent_level: 2,
        }
    }
}

impl CompressionOptions {
    /// Whether the assembler runs a minify pass at all.
    pub fn is_active(&self) -> bool {
        self.compress || self.mangle
    }
}

/// Game metadata from the config file, used to synthesize a header when the
/// entry source carries none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub desc: Option<String>,
    pub input: Option<String>,
}

impl GameInfo {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.desc.is_none() && self.input.is_none()
    }
}

/// Everything one build cycle needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Project root the bundler resolves modules from.
    pub cwd: PathBuf,
    /// Game source entry (TypeScript or JavaScript).
    pub entry_path: PathBuf,
    /// Intermediate bundled script written by the compiler stage.
    pub out_file: PathBuf,
    /// Final game file handed to the runtime.
    pub compressed_file: PathBuf,
    /// Path to the TIC-80 executable. `None` means build-only.
    pub tic_executable: Option<PathBuf>,
    /// Syntax/whitespace minification in the compiler stage.
    pub minify: bool,
    /// Dead-code elimination in the compiler stage.
    pub tree_shaking: bool,
    pub compression: CompressionOptions,
    pub game: GameInfo,
}

impl BuildConfig {
    pub fn new(
        entry_path: impl Into<PathBuf>,
        out_file: impl Into<PathBuf>,
        compressed_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            cwd: PathBuf::from("."),
            entry_path: entry_path.into(),
            out_file: out_file.into(),
            compressed_file: compressed_file.into(),
            tic_executable: None,
            minify: false,
            tree_shaking: false,
            compression: CompressionOptions::default(),
            game: GameInfo::default(),
        }
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn tic_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.tic_executable = Some(path.into());
        self
    }

    pub fn minify(mut self, enabled: bool) -> Self {
        self.minify = enabled;
        self
    }

    pub fn tree_shaking(mut self, enabled: bool) -> Self {
        self.tree_shaking = enabled;
        self
    }

    pub fn compression(mut self, compression: CompressionOptions) -> Self {
        self.compression = compression;
        self
    }

    pub fn game(mut self, game: GameInfo) -> Self {
        self.game = game;
        self
    }

    /// Paths the pipeline writes to. File watchers must ignore these.
    pub fn written_paths(&self) -> [&Path; 2] {
        [self.out_file.as_path(), self.compressed_file.as_path()]
    }
}
