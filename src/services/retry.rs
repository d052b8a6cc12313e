use std::future::Future;
use std::time::Duration;

use crate::{config::Config, error::AppResult};

/// Fixed-count, fixed-delay retry for calls to external services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.fetch_retries, config.retry_delay())
    }

    /// Runs `call` until it succeeds, fails permanently or the attempts are
    /// used up.
    ///
    /// Only transient errors (see [`crate::error::AppError::is_transient`]) are retried. The
    /// last error is returned unchanged.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut call: F) -> AppResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let mut attempt = 1;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.attempts && e.is_transient() => {
                    tracing::warn!(
                        operation = %operation,
                        attempt,
                        max_attempts = self.attempts,
                        error = %e,
                        "External call failed, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(
                        operation = %operation,
                        attempts = attempt,
                        error = %e,
                        "External call failed"
                    );
                    return Err(e);
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(2))
    }
}
