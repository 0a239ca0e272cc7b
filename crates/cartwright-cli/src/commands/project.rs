//! Loading a project once for either command.

use std::path::PathBuf;
use std::sync::Arc;

use cartwright_bundler::{BuildConfig, BuildPipeline, OxcMinifier, RolldownBundler};
use tracing::debug;

use super::utils;
use crate::cli::ProjectArgs;
use crate::config::{CartConfig, RuntimeSettings};
use crate::error::Result;
use crate::watch::WatchFilter;

/// A project with its configuration loaded, validated and resolved.
#[derive(Debug, Clone)]
pub struct Project {
    /// Canonical project directory.
    pub root: PathBuf,
    pub build: BuildConfig,
    pub runtime: RuntimeSettings,
}

impl Project {
    /// Resolve the project directory, load `cartwright.config.json` and check
    /// that the entry exists and the outputs can be written.
    pub fn load(args: &ProjectArgs) -> Result<Self> {
        let root = utils::project_root(args.cwd.as_deref())?;
        let config = CartConfig::load(args, &root)?;
        let build = config.to_build_config(&root)?;

        utils::validate_entry(&build.entry_path)?;
        for path in build.written_paths() {
            utils::ensure_parent_dir(path)?;
        }

        let runtime = config.runtime_settings(&root);
        debug!(root = %root.display(), ?build, "project loaded");

        Ok(Self {
            root,
            build,
            runtime,
        })
    }

    /// Pipeline backed by Rolldown and the oxc minifier.
    pub fn pipeline(&self) -> BuildPipeline {
        let minifier = Arc::new(OxcMinifier);
        BuildPipeline::new(
            self.build.clone(),
            Arc::new(RolldownBundler::new(minifier.clone())),
            minifier,
        )
    }

    /// Ignore everything the build or the cart backup writes.
    pub fn watch_filter(&self) -> WatchFilter {
        let mut filter = WatchFilter::new();
        for path in self.build.written_paths() {
            filter = filter.ignore_path(path);
        }
        filter.ignore_path(self.root.join(&self.runtime.cart))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CliError, ConfigError};
    use std::path::Path;
    use tempfile::TempDir;

    fn args(dir: &Path) -> ProjectArgs {
        ProjectArgs {
            cwd: Some(dir.to_path_buf()),
            ..ProjectArgs::default()
        }
    }

    fn write_project(dir: &Path, config: &str) {
        std::fs::create_dir_all(dir.join("src")).unwrap();
        std::fs::write(dir.join("src/main.ts"), "function TIC() {}\n").unwrap();
        std::fs::write(dir.join("cartwright.config.json"), config).unwrap();
    }

    #[test]
    fn test_load_resolves_and_prepares_outputs() {
        let dir = TempDir::new().unwrap();
        write_project(
            dir.path(),
            r#"{"entry":"src/main.ts","outfile":"build/bundle.js","compression":{"compressedFile":"out/game.js"}}"#,
        );

        let project = Project::load(&args(dir.path())).unwrap();
        let root = dir.path().canonicalize().unwrap();

        assert_eq!(project.root, root);
        assert_eq!(project.build.entry_path, root.join("src/main.ts"));
        assert!(root.join("build").is_dir());
        assert!(root.join("out").is_dir());
    }

    #[test]
    fn test_filter_ignores_outputs_and_cart() {
        let dir = TempDir::new().unwrap();
        write_project(
            dir.path(),
            r#"{"entry":"src/main.ts","outfile":"build/bundle.js","compression":{"compressedFile":"build/game.js"},"game":{"cart":"cart.tic"}}"#,
        );
        let project = Project::load(&args(dir.path())).unwrap();
        let filter = project.watch_filter();
        let root = &project.root;

        assert!(filter.should_ignore(&root.join("build/bundle.js"), root));
        assert!(filter.should_ignore(&root.join("build/game.js"), root));
        assert!(filter.should_ignore(&root.join("cart.tic"), root));
        assert!(!filter.should_ignore(&root.join("src/main.ts"), root));
    }

    #[test]
    fn test_missing_required_key_is_graceful() {
        let dir = TempDir::new().unwrap();
        write_project(dir.path(), r#"{"entry":"src/main.ts"}"#);

        let err = Project::load(&args(dir.path())).unwrap_err();
        assert!(err.is_graceful());
        assert!(matches!(
            err,
            CliError::Config(ConfigError::MissingField { ref field, .. }) if field == "outfile"
        ));
    }

    #[test]
    fn test_missing_entry_file() {
        let dir = TempDir::new().unwrap();
        write_project(
            dir.path(),
            r#"{"entry":"src/nope.ts","outfile":"b.js","compression":{"compressedFile":"g.js"}}"#,
        );

        let err = Project::load(&args(dir.path())).unwrap_err();
        assert!(!err.is_graceful());
        assert!(err.to_string().contains("nope.ts"));
    }
}
