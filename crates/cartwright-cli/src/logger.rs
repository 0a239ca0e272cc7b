//! Logging infrastructure for the Cartwright CLI.
//!
//! Structured logging on the `tracing` ecosystem. `--verbose` switches the
//! Cartwright crates to debug, `--quiet` keeps errors only, and `RUST_LOG`
//! overrides the default when neither flag is given.
//!
//! # Example
//!
//! ```rust,no_run
//! use cartwright_cli::logger::init_logger;
//! use tracing::{debug, info};
//!
//! init_logger(false, false, false);
//!
//! info!("Starting build");
//! debug!(entry = "src/main.ts", "reading entry");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "cartwright_cli=debug,cartwright_bundler=debug";
const QUIET_FILTER: &str = "cartwright_cli=error,cartwright_bundler=error";
const DEFAULT_FILTER: &str = "cartwright_cli=info,cartwright_bundler=warn";

/// Pick the log filter for the given flags.
///
/// The logging level is determined in this order:
/// 1. `--verbose` flag: DEBUG for the Cartwright crates
/// 2. `--quiet` flag: ERROR only
/// 3. `RUST_LOG` environment variable: custom filter
/// 4. Default: INFO for the CLI, WARN for the pipeline
pub fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the tracing subscriber.
///
/// Call once at the start of the program, before any logging occurs.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && crate::ui::should_use_color())
        .with_writer(std::io::stderr)
        .compact();

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(build_filter(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_parse() {
        // EnvFilter's rendering isn't guaranteed, so only check the directives
        // are accepted.
        let _ = build_filter(true, false);
        let _ = build_filter(false, true);
        let _ = EnvFilter::new(DEFAULT_FILTER);
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logger(false, true, true);
        init_logger(true, false, true);
    }
}
