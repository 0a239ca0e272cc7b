//! Shared test utilities for cartwright-bundler tests
//!
//! Fake bundlers that stand in for Rolldown, plus a throwaway project
//! layout in a temp directory.

#![allow(dead_code)]

use async_trait::async_trait;
use cartwright_bundler::{
    BuildConfig, BundleReport, BundleRequest, Bundler, CompileDiagnostic, DiagnosticKind, Error,
    Result,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A game project on disk: `src/main.js` plus a `build/` output folder.
pub struct TestProject {
    pub dir: TempDir,
}

impl TestProject {
    pub fn new(entry_source: &str) -> Self {
        let dir = TempDir::new().expect("temp dir");
        std::fs::create_dir_all(dir.path().join("src")).expect("src dir");
        std::fs::write(dir.path().join("src/main.js"), entry_source).expect("entry");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> BuildConfig {
        BuildConfig::new(
            "src/main.js",
            self.root().join("build/bundle.js"),
            self.root().join("build/game.js"),
        )
        .cwd(self.root())
    }

    pub fn artifact(&self) -> String {
        std::fs::read_to_string(self.root().join("build/game.js")).expect("artifact")
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.root().join("build/game.js")
    }
}

fn write_out(request: &BundleRequest, code: &str) -> Result<BundleReport> {
    if let Some(parent) = request.out_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&request.out_file, code)?;
    Ok(BundleReport {
        out_file: request.out_file.clone(),
        bytes: code.len(),
        warnings: 0,
    })
}

/// Emits the entry source unchanged, as a bundler with nothing to inline
/// would.
pub struct PassthroughBundler;

#[async_trait]
impl Bundler for PassthroughBundler {
    async fn bundle(&self, request: &BundleRequest) -> Result<BundleReport> {
        let code = std::fs::read_to_string(request.cwd.join(&request.entry))?;
        write_out(request, &code)
    }
}

/// Emits a fixed script regardless of the entry.
pub struct FixedBundler(pub &'static str);

#[async_trait]
impl Bundler for FixedBundler {
    async fn bundle(&self, request: &BundleRequest) -> Result<BundleReport> {
        write_out(request, self.0)
    }
}

/// Always fails to compile.
pub struct FailingBundler;

#[async_trait]
impl Bundler for FailingBundler {
    async fn bundle(&self, _request: &BundleRequest) -> Result<BundleReport> {
        Err(Error::Compile {
            diagnostics: vec![CompileDiagnostic::new(
                DiagnosticKind::ParseError,
                "Unexpected token",
            )],
        })
    }
}
