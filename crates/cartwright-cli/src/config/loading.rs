use crate::cli::ProjectArgs;
use crate::commands::utils::resolve_path;
use crate::config::CartConfig;
use crate::error::{ConfigError, Result};
use figment::{
    providers::{Env, Format as _, Json, Serialized},
    Figment,
};
use std::path::Path;
use tracing::{debug, info};

/// Config file looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = "cartwright.config.json";

/// Prefix of environment overrides. Nested keys use `__` as separator
/// (`CARTWRIGHT_MINIFY=true`, `CARTWRIGHT_COMPRESSION__MANGLE=true`).
pub const ENV_PREFIX: &str = "CARTWRIGHT_";

impl CartConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    pub fn load(project: &ProjectArgs, cwd: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match &project.config {
            Some(path) => {
                let path = resolve_path(path, cwd);
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path).into());
                }
                Some(path)
            }
            None => {
                let default_path = cwd.join(CONFIG_FILE_NAME);
                default_path.is_file().then_some(default_path)
            }
        };

        match &config_file {
            Some(path) => {
                debug!(path = %path.display(), "loading config file");
                figment = figment.merge(Json::file(path));
            }
            None => info!(
                "No {} in {}, using defaults",
                CONFIG_FILE_NAME,
                cwd.display()
            ),
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        figment = Self::merge_cli_overrides(figment, project);

        figment
            .extract()
            .map_err(|e| ConfigError::from(e).into())
    }

    /// CLI flags only override when given; an absent flag keeps the file's
    /// value.
    fn merge_cli_overrides(mut figment: Figment, project: &ProjectArgs) -> Figment {
        if project.minify {
            figment = figment.merge(Serialized::default("minify", true));
        }
        if project.tree_shaking {
            figment = figment.merge(Serialized::default("treeShaking", true));
        }
        if project.compress {
            figment = figment.merge(Serialized::default("compression.compress", true));
        }
        if project.mangle {
            figment = figment.merge(Serialized::default("compression.mangle", true));
        }
        if let Some(level) = project.indent_level {
            figment = figment.merge(Serialized::default("compression.indentLevel", level));
        }
        figment
    }
}
