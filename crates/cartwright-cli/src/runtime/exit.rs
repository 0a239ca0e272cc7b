//! Mirroring the runtime's exit onto this process.

use std::fmt;
use std::process::ExitStatus;

/// How the runtime process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDisposition {
    /// Normal exit with a status code.
    Code(i32),
    /// Terminated by a signal (unix only).
    Signal(i32),
}

impl ExitDisposition {
    pub fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ExitDisposition::Code(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ExitDisposition::Signal(signal);
            }
        }

        ExitDisposition::Code(1)
    }

    /// Status code to use when the disposition cannot be reproduced exactly.
    /// Signals map to the shell convention `128 + n`.
    pub fn fallback_code(self) -> i32 {
        match self {
            ExitDisposition::Code(code) => code,
            ExitDisposition::Signal(signal) => 128 + signal,
        }
    }

    pub fn is_success(self) -> bool {
        self == ExitDisposition::Code(0)
    }
}

impl fmt::Display for ExitDisposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitDisposition::Code(code) => write!(f, "exit code {code}"),
            ExitDisposition::Signal(signal) => write!(f, "signal {signal}"),
        }
    }
}

/// End this process the way the runtime ended.
///
/// A status code is passed through. A signal is reset to its default action
/// and raised against this process; if that does not terminate it, the
/// process exits with `128 + signal`.
pub fn propagate_exit(disposition: ExitDisposition) -> ! {
    if let ExitDisposition::Signal(signal) = disposition {
        reraise(signal);
    }
    std::process::exit(disposition.fallback_code())
}

#[cfg(unix)]
fn reraise(signal: i32) {
    tracing::debug!(signal, "re-raising runtime signal");
    // SAFETY: resetting a disposition to SIG_DFL and signalling our own pid
    // touch no Rust-managed state.
    unsafe {
        libc::signal(signal, libc::SIG_DFL);
        libc::kill(libc::getpid(), signal);
    }
    // Delivery is asynchronous.
    std::thread::sleep(std::time::Duration::from_millis(100));
}

#[cfg(not(unix))]
fn reraise(_signal: i32) {}
