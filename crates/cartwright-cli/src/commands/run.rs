//! `cartwright run`: build, launch TIC-80, rebuild on change.

use tokio::sync::mpsc;

use super::project::Project;
use crate::cli::RunArgs;
use crate::config::CONFIG_FILE_NAME;
use crate::error::Result;
use crate::runtime::{backup_cart, BackupOutcome, ExitDisposition, LaunchSpec, RuntimeLauncher};
use crate::ui;
use crate::watch::{FileWatcher, RunExit, WatchController};

/// Run the watch loop until the runtime exits or the user interrupts.
///
/// Returns the runtime's exit when the caller should mirror it, `None` for a
/// plain successful exit.
pub async fn execute(args: RunArgs) -> Result<Option<ExitDisposition>> {
    let project = Project::load(&args.project)?;

    let Some(executable) = project.build.tic_executable.clone() else {
        let report = project.pipeline().run_cycle().await?;
        ui::success(&format!("Built {}", report.artifact.path.display()));
        ui::warning(&format!(
            "Missing \"{}\" in {CONFIG_FILE_NAME}, nothing to launch",
            cartwright_bundler::TIC_EXECUTABLE_KEY
        ));
        return Ok(None);
    };

    let spec = LaunchSpec::new(
        executable,
        &project.root,
        project.runtime.cart.clone(),
        &project.build.compressed_file,
    );
    let (launcher, exits) = RuntimeLauncher::new(spec);

    let (watcher, mut changes) =
        FileWatcher::new(project.root.clone(), project.watch_filter(), args.debounce)?;
    ui::info(&format!("Watching {}", watcher.root().display()));

    let (interrupt_tx, mut interrupts) = mpsc::channel(2);
    let forwarder = tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if interrupt_tx.send(()).await.is_err() {
                break;
            }
        }
    });

    let mut controller = WatchController::new(project.pipeline()).with_runtime(launcher, exits);
    let exit = controller.run(&mut changes, &mut interrupts).await;
    forwarder.abort();
    drop(watcher);

    match exit? {
        RunExit::Runtime(disposition) => {
            if project.runtime.backup {
                backup(&project)?;
            }
            Ok(Some(disposition))
        }
        RunExit::Interrupted => {
            ui::info("Stopped");
            Ok(None)
        }
        RunExit::WatcherClosed => {
            ui::warning("File watcher stopped");
            Ok(None)
        }
    }
}

fn backup(project: &Project) -> Result<()> {
    let outcome = backup_cart(
        project.runtime.carts_directory.as_deref(),
        &project.runtime.cart,
        &project.root,
    )?;
    match outcome {
        BackupOutcome::Copied { to, .. } => ui::success(&format!("Cart saved to {}", to.display())),
        BackupOutcome::NoCartsDirectory => ui::warning(&format!(
            "Set \"tic.cartsDirectory\" in {CONFIG_FILE_NAME} to back up the cart"
        )),
        BackupOutcome::CartMissing(path) => ui::warning(&format!(
            "Unable to copy {}. Did you save your game at least once in TIC-80?",
            path.display()
        )),
    }
    Ok(())
}
