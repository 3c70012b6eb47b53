//! Exponential backoff with jitter for dead-host retry deadlines.

use rand::Rng;
use std::time::Duration;

use crate::config::DeadHostConfig;

/// Longest a node can stay excluded, before jitter.
pub const MAX_DEAD_HOST_DELAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Backoff policy applied to blacklisted nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadHostBackoff {
    base: Duration,
    max: Duration,
}

impl DeadHostBackoff {
    /// Both bounds are clamped to [`MAX_DEAD_HOST_DELAY`], and `max` never
    /// drops below `base`.
    pub fn new(base: Duration, max: Duration) -> Self {
        let base = base.min(MAX_DEAD_HOST_DELAY);
        Self {
            base,
            max: max.min(MAX_DEAD_HOST_DELAY).max(base),
        }
    }

    /// How long a node stays excluded after `failures` consecutive failures.
    pub fn timeout(&self, failures: u32) -> Duration {
        calculate_backoff(failures, self.base, self.max)
    }
}

impl Default for DeadHostBackoff {
    fn default() -> Self {
        Self::from(&DeadHostConfig::default())
    }
}

impl From<&DeadHostConfig> for DeadHostBackoff {
    fn from(config: &DeadHostConfig) -> Self {
        Self::new(
            Duration::from_millis(config.base_delay_ms),
            Duration::from_millis(config.max_delay_ms),
        )
    }
}

/// Calculate exponential backoff delay with jitter.
///
/// `base * 2^(attempt - 1)` capped at `max`, plus up to 10% jitter.
pub fn calculate_backoff(attempt: u32, base: Duration, max: Duration) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }

    let base_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX);
    let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);

    let exponential_base = 2u64.saturating_pow(attempt - 1);
    let capped_delay = base_ms.saturating_mul(exponential_base).min(max_ms);

    let jitter_range = capped_delay / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped_delay.saturating_add(jitter))
}
