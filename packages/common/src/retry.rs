use std::time::Duration;

use rand::Rng;

/// Bounded retry for transient read failures.
///
/// `max_retries == 0` disables retrying entirely: the first failure is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u8,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub const NONE: RetryPolicy = RetryPolicy {
        max_retries: 0,
        base_delay: Duration::ZERO,
        max_delay: Duration::ZERO,
    };

    /// Decide what to do after the given 1-based consecutive failure.
    pub fn decide(&self, failures: u8) -> RetryDecision {
        if failures == 0 || failures > self.max_retries {
            return RetryDecision::Exhausted;
        }
        RetryDecision::Retry {
            attempt: failures,
            delay: calculate_backoff(
                failures,
                self.base_delay.as_millis() as u64,
                self.max_delay.as_millis() as u64,
            ),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::NONE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Retry { attempt: u8, delay: Duration },
    Exhausted,
}

/// Calculate exponential backoff delay with jitter.
///
/// Formula: `min(base_ms * 2^(attempt-1) + jitter, max_ms)` (0-25% jitter)
pub fn calculate_backoff(attempt: u8, base_ms: u64, max_ms: u64) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }

    let exp_factor = 2u64.saturating_pow((attempt - 1) as u32);
    let delay_ms = base_ms.saturating_mul(exp_factor);

    let jitter = if delay_ms > 0 {
        rand::rng().random_range(0..=delay_ms / 4)
    } else {
        0
    };

    let total_delay = delay_ms.saturating_add(jitter).min(max_ms);
    Duration::from_millis(total_delay)
}
