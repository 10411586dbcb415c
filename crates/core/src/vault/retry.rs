//! Bounded retry with backoff for single-file filesystem operations.
//!
//! Network-backed and sync-client-backed filesystems fail transiently under
//! load. Every read and write in this core goes through [`RetryPolicy::run`]
//! so a transient failure surfaces to callers only as added latency.

use std::io;
use std::thread;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts before an error is classified as hard failure.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each subsequent one.
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: default_max_attempts(), backoff_ms: default_backoff_ms() }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    50
}

impl RetryPolicy {
    /// Run `op`, retrying transient failures up to `max_attempts` times
    /// with exponential backoff.
    pub fn run<T>(
        &self,
        what: &str,
        mut op: impl FnMut() -> io::Result<T>,
    ) -> io::Result<T> {
        let max = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(e) if attempt < max && is_transient(&e) => {
                    warn!(op = what, attempt, error = %e, "transient filesystem error, retrying");
                    thread::sleep(self.delay(attempt));
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn delay(&self, attempt: u32) -> Duration {
        // Cap the shift so a large attempt count cannot overflow.
        Duration::from_millis(self.backoff_ms << (attempt - 1).min(6))
    }
}

fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::Interrupted
            | io::ErrorKind::TimedOut
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::Other
    )
}
