//! The `run` loop: build, launch once, rebuild on change.
//!
//! One task owns the pipeline. File changes, runtime exits and interrupts
//! arrive on channels and are handled between cycles; changes that arrive
//! while a cycle runs are folded into a single follow-up cycle.

use std::future::pending;

use cartwright_bundler::{BuildPipeline, CycleReport};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use super::state::{Trigger, WatchState};
use super::watcher::FileChange;
use crate::error::Result;
use crate::runtime::{ExitDisposition, LaunchOutcome, RuntimeExit, RuntimeLauncher};
use crate::ui;

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunExit {
    /// The runtime exited; the process should mirror it.
    Runtime(ExitDisposition),
    /// Ctrl+C with no runtime left to wait for.
    Interrupted,
    /// The change channel closed.
    WatcherClosed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    pub started: usize,
    pub failed: usize,
    pub launches: usize,
}

pub struct WatchController {
    pipeline: BuildPipeline,
    state: WatchState,
    launcher: Option<RuntimeLauncher>,
    exits: Option<mpsc::Receiver<RuntimeExit>>,
    stats: CycleStats,
    built_once: bool,
}

impl WatchController {
    pub fn new(pipeline: BuildPipeline) -> Self {
        Self {
            pipeline,
            state: WatchState::Idle,
            launcher: None,
            exits: None,
            stats: CycleStats::default(),
            built_once: false,
        }
    }

    /// Launch the runtime after the first successful cycle.
    pub fn with_runtime(
        mut self,
        launcher: RuntimeLauncher,
        exits: mpsc::Receiver<RuntimeExit>,
    ) -> Self {
        self.launcher = Some(launcher);
        self.exits = Some(exits);
        self
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    pub fn stats(&self) -> CycleStats {
        self.stats
    }

    /// Run the initial cycle, then react to events until one ends the loop.
    ///
    /// A failed cycle is reported and the loop keeps going. The runtime is
    /// started once, after the first cycle that succeeds, and is never
    /// restarted: it picks up the rewritten game file by itself.
    ///
    /// An interrupt while the runtime is alive waits for the runtime to exit
    /// so its exit can be mirrored. A second interrupt ends the loop.
    pub async fn run(
        &mut self,
        changes: &mut mpsc::Receiver<FileChange>,
        interrupts: &mut mpsc::Receiver<()>,
    ) -> Result<RunExit> {
        self.state.request();
        if !self.build_until_settled(changes).await {
            return Ok(RunExit::WatcherClosed);
        }
        self.launch_if_ready()?;

        let mut waiting_for_runtime = false;
        loop {
            tokio::select! {
                change = changes.recv() => match change {
                    Some(change) => {
                        debug!(path = %change.path().display(), "change detected");
                        if self.state.request() == Trigger::Start {
                            if !self.build_until_settled(changes).await {
                                return Ok(RunExit::WatcherClosed);
                            }
                            self.launch_if_ready()?;
                        }
                    }
                    None => return Ok(RunExit::WatcherClosed),
                },
                Some(exit) = next_exit(&mut self.exits) => {
                    return Ok(RunExit::Runtime(exit.disposition));
                }
                Some(()) = interrupts.recv() => {
                    if self.runtime_active() && !waiting_for_runtime {
                        waiting_for_runtime = true;
                        ui::info("Waiting for TIC-80 to exit (Ctrl+C again to stop)");
                    } else {
                        info!("interrupted");
                        return Ok(RunExit::Interrupted);
                    }
                }
            }
        }
    }

    /// Run cycles until no request is pending. Returns `false` when the
    /// change channel closed meanwhile.
    async fn build_until_settled(&mut self, changes: &mut mpsc::Receiver<FileChange>) -> bool {
        let mut watching = true;
        loop {
            self.stats.started += 1;
            let result = {
                let cycle = self.pipeline.run_cycle();
                tokio::pin!(cycle);
                loop {
                    tokio::select! {
                        result = &mut cycle => break result,
                        change = changes.recv(), if watching => match change {
                            Some(change) => {
                                self.state.request();
                                debug!(path = %change.path().display(), "change during build, queued");
                            }
                            None => watching = false,
                        },
                    }
                }
            };
            self.record(result);

            if !self.state.finish() {
                return watching;
            }
        }
    }

    fn record(&mut self, result: cartwright_bundler::Result<CycleReport>) {
        match result {
            Ok(report) => {
                self.built_once = true;
                ui::success(&format!(
                    "Built {} in {}",
                    report.artifact.path.display(),
                    ui::format_duration(report.duration)
                ));
            }
            Err(err) => {
                self.stats.failed += 1;
                error!(error = %err, "build cycle failed");
                ui::error(&err.to_string());
            }
        }
    }

    fn launch_if_ready(&mut self) -> Result<()> {
        if !self.built_once || self.stats.launches > 0 {
            return Ok(());
        }
        let Some(launcher) = &self.launcher else {
            return Ok(());
        };
        if let LaunchOutcome::Started { pid } = launcher.launch()? {
            self.stats.launches += 1;
            ui::info(&format!("TIC-80 started (pid {pid})"));
        }
        Ok(())
    }

    fn runtime_active(&self) -> bool {
        self.launcher
            .as_ref()
            .is_some_and(|launcher| launcher.state().is_active())
    }
}

async fn next_exit(exits: &mut Option<mpsc::Receiver<RuntimeExit>>) -> Option<RuntimeExit> {
    match exits {
        Some(rx) => rx.recv().await,
        None => pending().await,
    }
}
