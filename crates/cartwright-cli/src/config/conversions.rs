use cartwright_bundler::{BuildConfig, CompressionOptions, GameInfo};
use std::path::{Path, PathBuf};

use crate::commands::utils::resolve_path;
use crate::config::CartConfig;
use crate::error::{ConfigError, Result};

/// What the runtime side of `run` needs from the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSettings {
    pub cart: String,
    pub carts_directory: Option<PathBuf>,
    pub backup: bool,
}

/// Resolve the runtime executable. A bare program name stays as-is so the
/// OS looks it up on `PATH`; anything with a directory part is resolved
/// against the project.
fn resolve_executable(path: &Path, cwd: &Path) -> PathBuf {
    if path.components().count() == 1 && path.is_relative() {
        path.to_path_buf()
    } else {
        resolve_path(path, cwd)
    }
}

fn required<'a>(value: Option<&'a PathBuf>, field: &str) -> Result<&'a PathBuf> {
    value.ok_or_else(|| {
        ConfigError::MissingField {
            field: field.to_string(),
            hint: format!("Add '{}' to cartwright.config.json", field),
        }
        .into()
    })
}

impl CartConfig {
    /// Validate and resolve into the pipeline's [`BuildConfig`].
    pub fn to_build_config(&self, cwd: &Path) -> Result<BuildConfig> {
        self.validate()?;

        let entry = required(self.entry.as_ref(), "entry")?;
        let outfile = required(self.outfile.as_ref(), "outfile")?;
        let compressed = required(
            self.compression.compressed_file.as_ref(),
            "compression.compressedFile",
        )?;

        let mut config = BuildConfig::new(
            resolve_path(entry, cwd),
            resolve_path(outfile, cwd),
            resolve_path(compressed, cwd),
        )
        .cwd(cwd)
        .minify(self.minify)
        .tree_shaking(self.tree_shaking)
        .compression(CompressionOptions {
            compress: self.compression.compress,
            mangle: self.compression.mangle,
            indent_level: self.compression.indent_level,
        })
        .game(GameInfo {
            title: self.game.title.clone(),
            author: self.game.author.clone(),
            desc: self.game.desc.clone(),
            input: self.game.input.clone(),
        });

        if let Some(executable) = self
            .tic
            .tic_executable
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty())
        {
            config = config.tic_executable(resolve_executable(executable, cwd));
        }

        Ok(config)
    }

    pub fn runtime_settings(&self, cwd: &Path) -> RuntimeSettings {
        RuntimeSettings {
            cart: self.game.cart.clone(),
            carts_directory: self
                .tic
                .carts_directory
                .as_ref()
                .map(|dir| resolve_path(dir, cwd)),
            backup: self.game.backup,
        }
    }
}
