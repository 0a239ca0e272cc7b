//! Terminal output for the cartwright CLI.
//!
//! Status lines, a spinner for the one-shot build and a short summary of
//! each build cycle. Everything goes to stderr so the runtime keeps stdout.
//!
//! ```no_run
//! use cartwright_cli::ui;
//!
//! ui::init_colors(false);
//!
//! let spinner = ui::Spinner::new("Building game...");
//! spinner.finish("Game written");
//!
//! ui::success("Build successful");
//! ui::error("Failed to parse file");
//! ```

mod format;
mod messages;
mod spinner;

pub use format::{cycle_summary_lines, format_duration, format_size, print_cycle_summary};
pub use messages::{error, info, success, warning};
pub use spinner::Spinner;

/// Variables set by common CI providers.
const CI_VARS: &[&str] = &["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS"];

pub fn is_ci() -> bool {
    CI_VARS.iter().any(|var| std::env::var_os(var).is_some())
}

/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise colors follow whether
/// stderr is attended.
pub fn should_use_color() -> bool {
    match (std::env::var_os("NO_COLOR"), std::env::var_os("FORCE_COLOR")) {
        (Some(_), _) => false,
        (None, Some(_)) => true,
        (None, None) => console::user_attended_stderr(),
    }
}

/// Apply the color decision to the terminal styling crates.
///
/// `no_color` comes from the `--no-color` flag.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    console::set_colors_enabled_stderr(enabled);
    owo_colors::set_override(enabled);
}

/// Spinners only make sense on an interactive terminal.
pub fn spinner_enabled() -> bool {
    !is_ci() && console::user_attended_stderr()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_ci_vars() {
        for var in CI_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_is_ci_with_ci_var() {
        clear_ci_vars();
        std::env::set_var("CI", "true");
        assert!(is_ci());
        assert!(!spinner_enabled());
        std::env::remove_var("CI");
    }

    #[test]
    #[serial]
    fn test_is_ci_with_github_actions() {
        clear_ci_vars();
        std::env::set_var("GITHUB_ACTIONS", "true");
        assert!(is_ci());
        std::env::remove_var("GITHUB_ACTIONS");
    }

    #[test]
    #[serial]
    fn test_should_use_color_no_color() {
        std::env::set_var("NO_COLOR", "1");
        std::env::remove_var("FORCE_COLOR");
        assert!(!should_use_color());
        std::env::remove_var("NO_COLOR");
    }

    #[test]
    #[serial]
    fn test_should_use_color_force_color() {
        std::env::remove_var("NO_COLOR");
        std::env::set_var("FORCE_COLOR", "1");
        assert!(should_use_color());
        std::env::remove_var("FORCE_COLOR");
    }

    #[test]
    #[serial]
    fn test_no_color_overrides_force() {
        std::env::set_var("NO_COLOR", "1");
        std::env::set_var("FORCE_COLOR", "1");
        assert!(!should_use_color());
        std::env::remove_var("NO_COLOR");
        std::env::remove_var("FORCE_COLOR");
    }

    #[test]
    #[serial]
    fn test_init_colors_flag_disables() {
        std::env::set_var("FORCE_COLOR", "1");
        init_colors(true);
        assert!(!console::colors_enabled_stderr());
        std::env::remove_var("FORCE_COLOR");
        owo_colors::unset_override();
    }
}
