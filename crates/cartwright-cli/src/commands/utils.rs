//! Shared utilities for command implementations.
//!
//! - Project directory resolution
//! - Path resolution and validation
//! - Entry point validation
//! - Output directory preparation

use crate::error::{BuildError, CliError, Result, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve a path relative to a working directory.
///
/// If the path is absolute, returns it unchanged. Otherwise, joins it with
/// the working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Validate that an entry point file exists.
///
/// # Errors
///
/// Returns `BuildError::EntryNotFound` if the file doesn't exist.
pub fn validate_entry(entry: &Path) -> Result<()> {
    if !entry.exists() {
        return Err(BuildError::EntryNotFound(entry.to_path_buf()).into());
    }

    if !entry.is_file() {
        return Err(CliError::Custom(format!(
            "Entry point is not a file: {}",
            entry.display()
        )));
    }

    Ok(())
}

/// Make sure the directory holding `file` exists.
pub fn ensure_parent_dir(file: &Path) -> Result<()> {
    let Some(dir) = file.parent().filter(|d| !d.as_os_str().is_empty()) else {
        return Ok(());
    };

    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|_| BuildError::OutputNotWritable(dir.to_path_buf()))?;
    } else if !dir.is_dir() {
        return Err(BuildError::OutputNotWritable(dir.to_path_buf()).into());
    }

    Ok(())
}

pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().context("Failed to get current directory")
}

/// Resolve the project directory from `--cwd`.
///
/// The result is canonical so paths reported by the file watcher compare
/// equal to paths derived from the config.
pub fn project_root(explicit: Option<&Path>) -> Result<PathBuf> {
    let cwd = get_cwd()?;
    let root = match explicit {
        Some(dir) => resolve_path(dir, &cwd),
        None => cwd,
    };

    if !root.is_dir() {
        return Err(CliError::FileNotFound(root));
    }

    Ok(root.canonicalize()?)
}
