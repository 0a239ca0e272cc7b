//! Copying the saved cart back into the project.
//!
//! TIC-80 saves sprites, maps and sounds into its own carts directory. With
//! `game.backup` enabled the cart is copied next to the project after the
//! runtime exits so it can be versioned with the code.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Result, ResultExt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    Copied { from: PathBuf, to: PathBuf, bytes: u64 },
    /// No carts directory configured.
    NoCartsDirectory,
    /// The runtime never saved the cart.
    CartMissing(PathBuf),
}

/// Copy `<carts_dir>/<cart>` to `<dest_dir>/<cart>`, replacing any existing
/// copy. A missing directory or cart is reported, not an error.
pub fn backup_cart(carts_dir: Option<&Path>, cart: &str, dest_dir: &Path) -> Result<BackupOutcome> {
    let Some(carts_dir) = carts_dir else {
        warn!("tic.cartsDirectory is not set, skipping cart backup");
        return Ok(BackupOutcome::NoCartsDirectory);
    };

    let from = carts_dir.join(cart);
    if !from.is_file() {
        warn!(cart = %from.display(), "cart not found, skipping backup");
        return Ok(BackupOutcome::CartMissing(from));
    }

    let to = dest_dir.join(cart);
    if to.exists() {
        std::fs::remove_file(&to)
            .with_hint(format!("Move {} aside so the cart can be backed up", to.display()))?;
    }
    let bytes = std::fs::copy(&from, &to).with_path(&from)?;
    info!(from = %from.display(), to = %to.display(), bytes, "cart backed up");

    Ok(BackupOutcome::Copied { from, to, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_backup_copies_and_replaces() {
        let carts = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        std::fs::write(carts.path().join("game.js"), "saved cart").unwrap();
        std::fs::write(project.path().join("game.js"), "old cart").unwrap();

        let outcome = backup_cart(Some(carts.path()), "game.js", project.path()).unwrap();

        assert_eq!(
            outcome,
            BackupOutcome::Copied {
                from: carts.path().join("game.js"),
                to: project.path().join("game.js"),
                bytes: 10,
            }
        );
        assert_eq!(
            std::fs::read_to_string(project.path().join("game.js")).unwrap(),
            "saved cart"
        );
    }

    #[test]
    fn test_backup_blocked_by_directory_has_hint() {
        let carts = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        std::fs::write(carts.path().join("game.js"), "saved cart").unwrap();
        std::fs::create_dir(project.path().join("game.js")).unwrap();

        let err = backup_cart(Some(carts.path()), "game.js", project.path()).unwrap_err();

        assert!(err.to_string().contains("Hint: Move "), "{err}");
        assert!(project.path().join("game.js").is_dir());
    }

    #[test]
    fn test_backup_without_carts_directory() {
        let project = TempDir::new().unwrap();
        let outcome = backup_cart(None, "game.js", project.path()).unwrap();
        assert_eq!(outcome, BackupOutcome::NoCartsDirectory);
    }

    #[test]
    fn test_backup_with_unsaved_cart() {
        let carts = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();

        let outcome = backup_cart(Some(carts.path()), "game.js", project.path()).unwrap();

        assert_eq!(outcome, BackupOutcome::CartMissing(carts.path().join("game.js")));
        assert!(!project.path().join("game.js").exists());
    }
}
