//! File system watcher with per-path debouncing.
//!
//! Watches the project root recursively and forwards relevant changes over a
//! channel. Hidden entries, `node_modules` and the files the build itself
//! writes are filtered out, otherwise every build would trigger the next.

use crate::error::{CliError, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Directory names ignored in every project.
pub const DEFAULT_IGNORE: &[&str] = &["node_modules"];

/// File change event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Modified(PathBuf),
    Created(PathBuf),
    Removed(PathBuf),
}

impl FileChange {
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }

    fn from_event(kind: &EventKind, path: PathBuf) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(FileChange::Created(path)),
            EventKind::Modify(_) => Some(FileChange::Modified(path)),
            EventKind::Remove(_) => Some(FileChange::Removed(path)),
            _ => None,
        }
    }
}

/// Which paths under the root do not trigger a rebuild.
#[derive(Debug, Clone, Default)]
pub struct WatchFilter {
    /// Directory names skipped wherever they appear (`node_modules`).
    pub dir_names: Vec<String>,
    /// Exact files, typically the bundle, the game file and the cart.
    pub paths: Vec<PathBuf>,
}

impl WatchFilter {
    pub fn new() -> Self {
        Self {
            dir_names: DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
            paths: Vec::new(),
        }
    }

    pub fn ignore_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Paths outside `root` are always ignored.
    pub fn should_ignore(&self, path: &Path, root: &Path) -> bool {
        let Ok(rel_path) = path.strip_prefix(root) else {
            return true;
        };

        if self
            .paths
            .iter()
            .any(|ignored| ignored == path || ignored == rel_path)
        {
            return true;
        }

        rel_path.components().any(|component| {
            component.as_os_str().to_str().is_some_and(|name| {
                (name.starts_with('.') && name != "." && name != "..")
                    || self.dir_names.iter().any(|dir| dir == name)
            })
        })
    }
}

/// Trailing-edge debounce: a path is released once it has been quiet for
/// the whole window, carrying its latest change.
#[derive(Debug)]
struct Debouncer {
    window: Duration,
    pending: HashMap<PathBuf, (FileChange, Instant)>,
}

impl Debouncer {
    fn new(window: Duration) -> Self {
        Self {
            window,
            pending: HashMap::new(),
        }
    }

    fn push(&mut self, change: FileChange, now: Instant) {
        let due = now + self.window;
        self.pending.insert(change.path().to_path_buf(), (change, due));
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|(_, due)| *due).min()
    }

    /// Remove and return every change whose window has passed.
    fn drain_due(&mut self, now: Instant) -> Vec<FileChange> {
        let due: Vec<PathBuf> = self
            .pending
            .iter()
            .filter(|(_, (_, deadline))| *deadline <= now)
            .map(|(path, _)| path.clone())
            .collect();
        due.into_iter()
            .filter_map(|path| self.pending.remove(&path).map(|(change, _)| change))
            .collect()
    }
}

/// Hold raw changes in a [`Debouncer`] and forward them once they settle.
/// Ends when either side of the channel pair closes.
async fn debounce_changes(
    mut raw: mpsc::UnboundedReceiver<FileChange>,
    tx: mpsc::Sender<FileChange>,
    window: Duration,
) {
    let mut debouncer = Debouncer::new(window);

    loop {
        let deadline = debouncer.next_deadline();
        let settled = async move {
            match deadline {
                Some(at) => tokio::time::sleep_until(at.into()).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            change = raw.recv() => match change {
                Some(change) => debouncer.push(change, Instant::now()),
                None => return,
            },
            _ = settled => {}
        }

        for change in debouncer.drain_due(Instant::now()) {
            if tx.send(change).await.is_err() {
                return;
            }
        }
    }
}

/// Recursive watcher over the project root.
///
/// Dropping the watcher stops notify and closes the change channel.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl FileWatcher {
    /// Start watching `root`. Returns the watcher and the receiving end of
    /// the change channel.
    ///
    /// Must be called from within a tokio runtime; debouncing runs as a
    /// spawned task.
    pub fn new(
        root: PathBuf,
        filter: WatchFilter,
        debounce: Duration,
    ) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        if !root.is_dir() {
            return Err(CliError::FileNotFound(root));
        }

        let (tx, rx) = mpsc::channel(100);
        let (raw_tx, raw_rx) = mpsc::unbounded_channel();
        let event_root = root.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(err) => {
                    debug!(error = %err, "watch error");
                    return;
                }
            };

            for path in event.paths {
                if filter.should_ignore(&path, &event_root) {
                    trace!(path = %path.display(), "change ignored");
                    continue;
                }
                if let Some(change) = FileChange::from_event(&event.kind, path) {
                    // Receiver gone means the controller is shutting down.
                    let _ = raw_tx.send(change);
                }
            }
        })?;

        watcher.watch(&root, RecursiveMode::Recursive)?;
        tokio::spawn(debounce_changes(raw_rx, tx, debounce));
        debug!(root = %root.display(), "watching");

        Ok((
            Self {
                _watcher: watcher,
                root,
            },
            rx,
        ))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
