//! Spawning the TIC-80 runtime and watching for its exit.
//!
//! The launcher holds a small state machine behind a `parking_lot` mutex:
//!
//! ```text
//! Idle ──launch──▶ Spawning ──spawned──▶ Running ──exit──▶ Exited
//!   ▲                 │
//!   └──spawn failed───┘
//! ```
//!
//! A launch request while `Spawning` or `Running` does nothing. The exit is
//! observed by a background task and delivered as a [`RuntimeExit`] on the
//! channel returned by [`RuntimeLauncher::new`].

use std::path::{Component, Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::exit::ExitDisposition;
use crate::error::{CliError, Result};

/// Flags passed before the console command: skip the intro and keep the
/// console open for `--cmd`.
pub const RUNTIME_FLAGS: [&str; 2] = ["--skip", "--keepcmd"];

/// Everything needed to build the runtime command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub executable: PathBuf,
    /// Directory exposed to the runtime as its file system.
    pub fs_root: PathBuf,
    /// Cart loaded first for its sprites and sounds.
    pub cart: String,
    /// Game file loaded as the cart's code.
    pub artifact: PathBuf,
}

impl LaunchSpec {
    pub fn new(
        executable: impl Into<PathBuf>,
        fs_root: impl Into<PathBuf>,
        cart: impl Into<String>,
        artifact: impl Into<PathBuf>,
    ) -> Self {
        Self {
            executable: executable.into(),
            fs_root: fs_root.into(),
            cart: cart.into(),
            artifact: artifact.into(),
        }
    }

    /// The artifact as the runtime sees it, relative to `fs_root`.
    pub fn artifact_arg(&self) -> Result<String> {
        self.artifact
            .strip_prefix(&self.fs_root)
            .map(console_path)
            .map_err(|_| CliError::ArtifactOutsideRoot {
                artifact: self.artifact.clone(),
                fs_root: self.fs_root.clone(),
            })
    }

    /// Console command run after boot.
    pub fn console_command(&self) -> Result<String> {
        Ok(format!(
            "load {} & load {} code & run",
            self.cart,
            self.artifact_arg()?
        ))
    }

    pub fn args(&self) -> Result<Vec<String>> {
        let mut args: Vec<String> = RUNTIME_FLAGS.iter().map(|s| s.to_string()).collect();
        args.push(format!("--fs={}", self.fs_root.display()));
        args.push("--cmd".to_string());
        args.push(self.console_command()?);
        Ok(args)
    }
}

/// Join path components with `/`, which the runtime console expects on
/// every platform.
fn console_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherState {
    Idle,
    Spawning,
    Running { pid: u32 },
    Exited(ExitDisposition),
}

impl LauncherState {
    /// Whether a runtime is being started or is alive.
    pub fn is_active(&self) -> bool {
        matches!(self, LauncherState::Spawning | LauncherState::Running { .. })
    }
}

/// Sent once per launched runtime when it exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeExit {
    pub pid: u32,
    pub disposition: ExitDisposition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    Started { pid: u32 },
    AlreadyRunning,
}

/// Starts at most one runtime at a time.
pub struct RuntimeLauncher {
    spec: LaunchSpec,
    state: Arc<Mutex<LauncherState>>,
    exits: mpsc::Sender<RuntimeExit>,
}

impl RuntimeLauncher {
    /// Create a launcher and the receiving end for exit notifications.
    pub fn new(spec: LaunchSpec) -> (Self, mpsc::Receiver<RuntimeExit>) {
        let (exits, rx) = mpsc::channel(4);
        let launcher = Self {
            spec,
            state: Arc::new(Mutex::new(LauncherState::Idle)),
            exits,
        };
        (launcher, rx)
    }

    pub fn spec(&self) -> &LaunchSpec {
        &self.spec
    }

    pub fn state(&self) -> LauncherState {
        *self.state.lock()
    }

    /// Spawn the runtime with inherited stdio.
    ///
    /// Must be called from within a tokio runtime; the exit waiter is a
    /// spawned task.
    pub fn launch(&self) -> Result<LaunchOutcome> {
        let args = {
            let mut state = self.state.lock();
            if state.is_active() {
                debug!(state = ?*state, "runtime already running, launch ignored");
                return Ok(LaunchOutcome::AlreadyRunning);
            }
            let args = self.spec.args()?;
            *state = LauncherState::Spawning;
            args
        };

        info!(
            executable = %self.spec.executable.display(),
            args = ?args,
            "launching runtime"
        );

        let spawned = Command::new(&self.spec.executable)
            .args(&args)
            .current_dir(&self.spec.fs_root)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(source) => {
                *self.state.lock() = LauncherState::Idle;
                return Err(CliError::Launch {
                    executable: self.spec.executable.clone(),
                    source,
                });
            }
        };

        let pid = child.id().unwrap_or_default();
        *self.state.lock() = LauncherState::Running { pid };

        let state = Arc::clone(&self.state);
        let exits = self.exits.clone();
        tokio::spawn(async move {
            let disposition = match child.wait().await {
                Ok(status) => ExitDisposition::from_status(status),
                Err(err) => {
                    warn!(pid, error = %err, "lost track of runtime process");
                    ExitDisposition::Code(1)
                }
            };
            info!(pid, %disposition, "runtime exited");
            *state.lock() = LauncherState::Exited(disposition);
            let _ = exits.send(RuntimeExit { pid, disposition }).await;
        });

        Ok(LaunchOutcome::Started { pid })
    }
}
