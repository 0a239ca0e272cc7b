//! Watch mode: rebuild on change, supervise the runtime.

pub mod controller;
pub mod state;
pub mod watcher;

pub use controller::{CycleStats, RunExit, WatchController};
pub use state::{Trigger, WatchState};
pub use watcher::{FileChange, FileWatcher, WatchFilter};
