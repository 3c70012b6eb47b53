//! Blacklist entry for a node that recently failed.
//!
//! # State Transitions
//! ```text
//! (live) --mark_dead--> Dead { failures: 1 }
//! Dead   --mark_dead--> Dead { failures: n + 1, later retry deadline }
//! Dead   --mark_alive / reconfigure--> (live)
//! ```

use std::time::{Duration, Instant, SystemTime};

use crate::resilience::backoff::DeadHostBackoff;

/// A node temporarily excluded from selection.
#[derive(Debug, Clone)]
pub struct DeadHostState {
    /// Wall-clock time the node was first blacklisted.
    since: SystemTime,
    /// Consecutive failures since the node was last seen alive.
    failures: u32,
    /// Earliest instant the node may be tried again.
    retry_at: Instant,
}

impl DeadHostState {
    /// First failure of a live node.
    pub fn new(backoff: &DeadHostBackoff) -> Self {
        Self::at(Instant::now(), SystemTime::now(), 1, backoff)
    }

    /// Another failure of an already dead node.
    pub fn next(&self, backoff: &DeadHostBackoff) -> Self {
        Self::at(Instant::now(), self.since, self.failures.saturating_add(1), backoff)
    }

    fn at(now: Instant, since: SystemTime, failures: u32, backoff: &DeadHostBackoff) -> Self {
        Self {
            since,
            failures,
            retry_at: now + backoff.timeout(failures),
        }
    }

    pub fn since(&self) -> SystemTime {
        self.since
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn retry_at(&self) -> Instant {
        self.retry_at
    }

    /// Whether the retry deadline has passed.
    pub fn is_retry_due(&self, now: Instant) -> bool {
        now >= self.retry_at
    }

    /// Time left until the node becomes eligible again.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.retry_at.saturating_duration_since(now)
    }
}
