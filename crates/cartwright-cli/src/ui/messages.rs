//! One-line status messages on stderr.

use owo_colors::OwoColorize;

/// Print a success line, e.g. after the game file is written.
///
/// ```no_run
/// use cartwright_cli::ui::success;
///
/// success("Wrote build/game.js");
/// ```
pub fn success(message: &str) {
    eprintln!("{} {}", "✓".green().bold(), message);
}

/// Print an informational line.
pub fn info(message: &str) {
    eprintln!("{} {}", "ℹ".blue().bold(), message);
}

/// Print a warning. Used for conditions the tool recovers from, such as a
/// missing required config key or a build without a runtime executable.
///
/// ```no_run
/// use cartwright_cli::ui::warning;
///
/// warning("No tic.ticExecutable configured, build only");
/// ```
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
}

/// Print an error line without stopping anything. Watch mode reports
/// compile failures this way and keeps going.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        success("Wrote build/game.js");
        info("Watching for changes");
        warning("No tic.ticExecutable configured");
        error("Compile error: ParseError: Unexpected token");
    }
}
