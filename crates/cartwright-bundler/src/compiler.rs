//! Compiler stage: bundle the entry and its imports into one script.
//!
//! The stage sits behind the [`Bundler`] trait so the pipeline and the watch
//! loop can be driven by a fake in tests. [`RolldownBundler`] is the real
//! implementation.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use path_clean::PathClean;
use rolldown::{BundlerBuilder, BundlerOptions, InputItem, OutputFormat, Platform};
use rolldown_common::{Output, TreeshakeOptions};
use tracing::{debug, instrument};

use crate::config::BuildConfig;
use crate::diagnostics::{CompileDiagnostic, DiagnosticKind};
use crate::minify::{MinifyOptions, Minifier, OxcMinifier};
use crate::{Error, Result};

/// Inputs for one compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleRequest {
    pub cwd: PathBuf,
    pub entry: PathBuf,
    pub out_file: PathBuf,
    pub tree_shaking: bool,
    pub minify: bool,
}

impl BundleRequest {
    pub fn from_config(config: &BuildConfig) -> Self {
        Self {
            cwd: config.cwd.clone(),
            entry: config.entry_path.clone(),
            out_file: config.out_file.clone(),
            tree_shaking: config.tree_shaking,
            minify: config.minify,
        }
    }
}

/// What a successful compile produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleReport {
    pub out_file: PathBuf,
    pub bytes: usize,
    pub warnings: usize,
}

/// Turns an entry file into a single bundled script on disk.
///
/// Implementations must write the script to `request.out_file` and only
/// return once the write has been issued. A failure to compile is returned as
/// [`Error::Compile`].
#[async_trait]
pub trait Bundler: Send + Sync {
    async fn bundle(&self, request: &BundleRequest) -> Result<BundleReport>;
}

/// [`Bundler`] backed by Rolldown.
///
/// Emits an ES module with every import inlined. When minification is
/// requested it runs as a syntax/whitespace pass; identifier mangling is left
/// to the assembler so the user's `compression.mangle` setting stays in
/// control.
pub struct RolldownBundler {
    minifier: Arc<dyn Minifier>,
}

impl Default for RolldownBundler {
    fn default() -> Self {
        Self::new(Arc::new(OxcMinifier))
    }
}

impl RolldownBundler {
    pub fn new(minifier: Arc<dyn Minifier>) -> Self {
        Self { minifier }
    }

    fn rolldown_options(request: &BundleRequest) -> BundlerOptions {
        let entry = if request.entry.is_absolute() {
            request.entry.clone()
        } else {
            request.cwd.join(&request.entry).clean()
        };

        BundlerOptions {
            input: Some(vec![InputItem {
                name: None,
                import: entry.to_string_lossy().into_owned(),
            }]),
            cwd: Some(request.cwd.clone()),
            format: Some(OutputFormat::Esm),
            platform: Some(Platform::Neutral),
            treeshake: TreeshakeOptions::Boolean(request.tree_shaking),
            keep_names: Some(true),
            ..Default::default()
        }
    }
}

#[async_trait]
impl Bundler for RolldownBundler {
    #[instrument(skip_all, fields(entry = %request.entry.display()))]
    async fn bundle(&self, request: &BundleRequest) -> Result<BundleReport> {
        let options = Self::rolldown_options(request);

        let mut bundler = BundlerBuilder::default()
            .with_options(options)
            .build()
            .map_err(|e| Error::from_rolldown_batch(&e))?;

        let output = bundler
            .generate()
            .await
            .map_err(|e| Error::from_rolldown_batch(&e))?;

        let warnings = output.warnings.len();
        let chunks: Vec<_> = output
            .assets
            .iter()
            .filter_map(|asset| match asset {
                Output::Chunk(chunk) => Some(chunk),
                _ => None,
            })
            .collect();
        let code = chunks
            .iter()
            .find(|chunk| chunk.is_entry)
            .or_else(|| chunks.first())
            .map(|chunk| chunk.code.clone())
            .ok_or_else(|| Error::Compile {
                diagnostics: vec![CompileDiagnostic::new(
                    DiagnosticKind::Other,
                    "bundle produced no JavaScript chunk",
                )],
            })?;

        let code = if request.minify {
            self.minifier.minify(&code, &MinifyOptions::syntax_only())?
        } else {
            code
        };

        write_script(&request.out_file, &code).await?;
        debug!(
            out_file = %request.out_file.display(),
            bytes = code.len(),
            warnings,
            "bundled script written"
        );

        Ok(BundleReport {
            out_file: request.out_file.clone(),
            bytes: code.len(),
            warnings,
        })
    }
}

/// Write `contents` to `path`, creating parent directories as needed.
pub(crate) async fn write_script(path: &std::path::Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            Error::io(
                format!("Failed to create directory {}", parent.display()),
                e,
            )
        })?;
    }
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))
}
