//! Bounded retry with backoff.
//!
//! The bundler's output file can be observed mid-write (empty or truncated)
//! when a watcher fires between the bundler's open and close. Reads go through
//! [`read_with_retry`], which waits until the file is at least `min_len`
//! bytes or the attempt budget runs out.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Minimum acceptable content length in bytes.
    pub min_len: usize,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            min_len: 10,
            initial_backoff: Duration::from_millis(5),
            max_backoff: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// Delay after the given failed attempt (1-based), doubling each time up
    /// to `max_backoff`.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(16);
        self.initial_backoff
            .saturating_mul(1u32 << shift)
            .min(self.max_backoff)
    }

    /// Run `op` until it yields `Some`, sleeping between attempts.
    ///
    /// Returns the value and the attempt that produced it, or `None` when the
    /// budget is exhausted.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Option<(T, u32)>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        for attempt in 1..=self.max_attempts {
            if let Some(value) = op(attempt).await {
                return Some((value, attempt));
            }
            if attempt < self.max_attempts {
                tokio::time::sleep(self.backoff_for(attempt)).await;
            }
        }
        None
    }
}

/// Read `path` as UTF-8 once it holds at least `policy.min_len` bytes.
pub async fn read_with_retry(path: &Path, policy: &RetryPolicy) -> Result<String> {
    let min_len = policy.min_len;

    let result = policy
        .run(|attempt| async move {
            match tokio::fs::read_to_string(path).await {
                Ok(text) if text.len() >= min_len => Some(text),
                Ok(text) => {
                    debug!(
                        path = %path.display(),
                        attempt,
                        len = text.len(),
                        "bundled output too short, retrying"
                    );
                    None
                }
                Err(err) => {
                    debug!(path = %path.display(), attempt, error = %err, "bundled output unreadable, retrying");
                    None
                }
            }
        })
        .await;

    match result {
        Some((text, attempt)) => {
            if attempt > 1 {
                debug!(path = %path.display(), attempt, "bundled output readable");
            }
            Ok(text)
        }
        None => Err(Error::ArtifactUnavailable {
            path: path.to_path_buf(),
            attempts: policy.max_attempts,
        }),
    }
}
