//! Game file assembly.
//!
//! Takes the bundled script, removes the strict-mode directive (TIC-80 runs
//! games as sloppy-mode scripts), optionally runs a second minify pass and
//! writes `header + code` to the artifact path.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::Result;
use crate::compiler::write_script;
use crate::config::CompressionOptions;
use crate::metadata::MetadataHeader;
use crate::minify::{MinifyOptions, Minifier};
use crate::retry::{RetryPolicy, read_with_retry};

/// The directive removed from bundled output.
pub const STRICT_MODE_PRAGMA: &str = "\"use strict\";";

/// Game code shorter than this is almost certainly a broken build.
pub const MIN_CODE_LEN: usize = 10;

/// Remove the first literal `"use strict";` from `code`.
///
/// Textual, not syntactic: a later occurrence, say inside a string literal,
/// is left alone.
pub fn strip_strict_mode(code: &str) -> Cow<'_, str> {
    if code.contains(STRICT_MODE_PRAGMA) {
        Cow::Owned(code.replacen(STRICT_MODE_PRAGMA, "", 1))
    } else {
        Cow::Borrowed(code)
    }
}

/// Result of writing one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleReport {
    pub path: PathBuf,
    /// Total bytes written, header included.
    pub bytes: usize,
    /// Length of the code portion.
    pub code_len: usize,
    pub minified: bool,
}

impl AssembleReport {
    pub fn is_suspiciously_small(&self) -> bool {
        self.code_len < MIN_CODE_LEN
    }
}

/// Writes the final game file.
pub struct GameFileAssembler {
    minifier: Arc<dyn Minifier>,
    retry: RetryPolicy,
}

impl GameFileAssembler {
    pub fn new(minifier: Arc<dyn Minifier>) -> Self {
        Self {
            minifier,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Clean and optionally minify bundled code. Pure: the same input always
    /// yields the same output.
    pub fn prepare_code(&self, raw: &str, compression: &CompressionOptions) -> Result<String> {
        let code = strip_strict_mode(raw);
        if !compression.is_active() {
            return Ok(code.into_owned());
        }

        let minified = self
            .minifier
            .minify(&code, &MinifyOptions::second_pass(compression))?;
        // Only a re-emitted directive prologue; the rest is user code.
        Ok(match minified.strip_prefix(STRICT_MODE_PRAGMA) {
            Some(rest) => rest.to_string(),
            None => minified,
        })
    }

    /// Full artifact text for bundled code `raw`.
    pub fn render(
        &self,
        raw: &str,
        header: &MetadataHeader,
        compression: &CompressionOptions,
    ) -> Result<String> {
        let code = self.prepare_code(raw, compression)?;
        let mut artifact = header.render();
        artifact.push_str(&code);
        Ok(artifact)
    }

    /// Read the bundled script at `bundle_path` and write the game file to
    /// `artifact_path`.
    pub async fn assemble(
        &self,
        bundle_path: &Path,
        artifact_path: &Path,
        header: &MetadataHeader,
        compression: &CompressionOptions,
    ) -> Result<AssembleReport> {
        let raw = read_with_retry(bundle_path, &self.retry).await?;
        let code = self.prepare_code(&raw, compression)?;

        if code.len() < MIN_CODE_LEN {
            warn!(
                artifact = %artifact_path.display(),
                len = code.len(),
                "game code is suspiciously short, the build may be broken"
            );
            debug!(raw = %raw, code = %code, "bundled script before minification");
        }

        let mut artifact = header.render();
        artifact.push_str(&code);
        write_script(artifact_path, &artifact).await?;

        debug!(
            artifact = %artifact_path.display(),
            header_lines = header.len(),
            bytes = artifact.len(),
            "game file written"
        );

        Ok(AssembleReport {
            path: artifact_path.to_path_buf(),
            bytes: artifact.len(),
            code_len: code.len(),
            minified: compression.is_active(),
        })
    }
}
