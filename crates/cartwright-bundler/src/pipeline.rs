//! One build cycle: extract metadata, compile, assemble.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, instrument, warn};

use crate::assembler::{AssembleReport, GameFileAssembler};
use crate::compiler::{BundleReport, BundleRequest, Bundler};
use crate::config::BuildConfig;
use crate::metadata::MetadataHeader;
use crate::minify::Minifier;
use crate::retry::RetryPolicy;
use crate::{Error, Result};

/// Config key that enables launching the runtime.
pub const TIC_EXECUTABLE_KEY: &str = "tic.ticExecutable";

/// Whether the artifact can be handed to the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Artifact written and a runtime executable is configured.
    Ready { artifact: PathBuf, executable: PathBuf },
    /// Artifact written, but there is nothing to launch it with.
    BuildOnly {
        artifact: PathBuf,
        missing_key: &'static str,
    },
}

impl BuildOutcome {
    pub fn artifact(&self) -> &PathBuf {
        match self {
            BuildOutcome::Ready { artifact, .. } | BuildOutcome::BuildOnly { artifact, .. } => {
                artifact
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct CycleReport {
    pub header: MetadataHeader,
    /// True when the header came from the config's game section.
    pub header_from_config: bool,
    pub bundle: BundleReport,
    pub artifact: AssembleReport,
    pub outcome: BuildOutcome,
    pub duration: Duration,
}

/// Runs build cycles for one project.
pub struct BuildPipeline {
    config: BuildConfig,
    bundler: Arc<dyn Bundler>,
    assembler: GameFileAssembler,
}

impl BuildPipeline {
    pub fn new(config: BuildConfig, bundler: Arc<dyn Bundler>, minifier: Arc<dyn Minifier>) -> Self {
        Self {
            config,
            bundler,
            assembler: GameFileAssembler::new(minifier),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.assembler = self.assembler.with_retry(retry);
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Run extractor, compiler and assembler in order.
    ///
    /// A compile failure aborts the cycle before the assembler runs, so the
    /// previous artifact stays on disk.
    #[instrument(skip_all, fields(entry = %self.config.entry_path.display()))]
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let started = Instant::now();
        let config = &self.config;

        let entry = self.entry_path();
        let source = tokio::fs::read_to_string(&entry)
            .await
            .map_err(|source| Error::EntryUnreadable {
                path: entry.clone(),
                source,
            })?;

        let mut header = MetadataHeader::extract(&source);
        let header_from_config = header.is_empty() && !config.game.is_empty();
        if header_from_config {
            header = MetadataHeader::from_game(&config.game);
        }

        let bundle = self
            .bundler
            .bundle(&BundleRequest::from_config(config))
            .await?;

        let artifact = self
            .assembler
            .assemble(
                &bundle.out_file,
                &config.compressed_file,
                &header,
                &config.compression,
            )
            .await?;

        let outcome = match &config.tic_executable {
            Some(executable) => BuildOutcome::Ready {
                artifact: artifact.path.clone(),
                executable: executable.clone(),
            },
            None => {
                warn!(
                    key = TIC_EXECUTABLE_KEY,
                    "no runtime executable configured, build only"
                );
                BuildOutcome::BuildOnly {
                    artifact: artifact.path.clone(),
                    missing_key: TIC_EXECUTABLE_KEY,
                }
            }
        };

        let duration = started.elapsed();
        info!(
            artifact = %artifact.path.display(),
            bytes = artifact.bytes,
            header_lines = header.len(),
            ms = duration.as_millis() as u64,
            "build cycle complete"
        );

        Ok(CycleReport {
            header,
            header_from_config,
            bundle,
            artifact,
            outcome,
            duration,
        })
    }

    fn entry_path(&self) -> PathBuf {
        if self.config.entry_path.is_absolute() {
            self.config.entry_path.clone()
        } else {
            self.config.cwd.join(&self.config.entry_path)
        }
    }
}
