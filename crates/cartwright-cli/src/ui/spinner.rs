//! Spinner shown while a one-shot build runs.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

const TICKS: &[&str] = &["◐", "◓", "◑", "◒"];

/// Spinner for the `build` command.
///
/// Hidden when stderr is not a terminal or when running in CI, so
/// redirected output only carries the final status line.
///
/// ```no_run
/// use cartwright_cli::ui::Spinner;
///
/// let spinner = Spinner::new("Building game...");
/// spinner.finish("Wrote build/game.js");
/// ```
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = if super::spinner_enabled() {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };

        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// Stop with a green check. Hidden spinners fall back to a plain line.
    pub fn finish(&self, message: &str) {
        if self.pb.is_hidden() {
            self.pb.finish_and_clear();
            super::success(message);
        } else {
            self.pb
                .finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Stop with a red cross.
    pub fn fail(&self, message: &str) {
        if self.pb.is_hidden() {
            self.pb.finish_and_clear();
            super::error(message);
        } else {
            self.pb
                .finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }
}
