//! Retry policy for throttled HTTP requests.

use crate::error::HttpError;
use std::time::Duration;

/// Exponential backoff schedule: `initial_delay * factor^attempt`, capped.
#[derive(Debug, Clone, PartialEq)]
pub struct Backoff {
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: f64,
}

impl Backoff {
    pub fn new(initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            initial_delay,
            max_delay,
            backoff_factor: 2.0,
        }
    }

    /// Calculate delay for a given attempt (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base =
            self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);
        Duration::from_millis(capped as u64)
    }
}

/// Configuration for retry behavior.
///
/// Rate-limit responses (429) and server errors (5xx) back off on separate
/// schedules; every other failure is returned to the caller immediately.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts per request, counting the first one.
    pub max_attempts: u32,
    /// Schedule used after a 429.
    pub rate_limited: Backoff,
    /// Schedule used after a 5xx.
    pub server_error: Backoff,
    /// Whether to add ±25% jitter to the delay.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            rate_limited: Backoff::new(Duration::from_millis(5000), Duration::from_secs(30)),
            server_error: Backoff::new(Duration::from_millis(2000), Duration::from_secs(30)),
            jitter: false,
        }
    }
}

impl RetryConfig {
    /// A single attempt, never retried.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Same attempt budget as the default with uniform, short delays.
    pub fn with_delays(initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            rate_limited: Backoff::new(initial_delay, max_delay),
            server_error: Backoff::new(initial_delay, max_delay),
            ..Self::default()
        }
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Delay to wait after `error` on `attempt` (0-indexed), or `None` when the
    /// error must be surfaced immediately.
    pub fn delay_for(&self, error: &HttpError, attempt: u32) -> Option<Duration> {
        let delay = match error {
            HttpError::RateLimited { retry_after_ms } => {
                let scheduled = self.rate_limited.delay_for_attempt(attempt);
                let hinted = retry_after_ms.map(Duration::from_millis).unwrap_or_default();
                scheduled.max(hinted).min(self.rate_limited.max_delay)
            }
            HttpError::ServerError { .. } => self.server_error.delay_for_attempt(attempt),
            _ => return None,
        };
        Some(self.apply_jitter(delay))
    }

    fn apply_jitter(&self, delay: Duration) -> Duration {
        if !self.jitter {
            return delay;
        }
        let ms = delay.as_millis() as f64;
        let jitter_range = ms * 0.25;
        let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
        Duration::from_millis((ms + jitter).max(0.0) as u64)
    }
}
