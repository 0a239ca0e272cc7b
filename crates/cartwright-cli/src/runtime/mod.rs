//! Supervising the TIC-80 runtime.
//!
//! - [`launcher`] spawns the runtime at most once and reports its exit over
//!   a channel.
//! - [`exit`] describes how the child ended and ends this process the same
//!   way.
//! - [`backup`] copies the saved cart out of the runtime's carts directory.

pub mod backup;
pub mod exit;
pub mod launcher;

pub use backup::{backup_cart, BackupOutcome};
pub use exit::{propagate_exit, ExitDisposition};
pub use launcher::{LaunchOutcome, LaunchSpec, LauncherState, RuntimeExit, RuntimeLauncher};
