//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to node fails:
//!     → NodeSelector::mark_dead
//!     → backoff.rs (retry deadline grows with consecutive failures)
//!     → node skipped by select() until the deadline passes
//! ```
//!
//! # Design Decisions
//! - Timeouts are owned by the HTTP client; they surface as transport errors
//! - Failover to the next node happens inside a single request
//! - Backoff bounds are configuration, not hard-coded library behavior

pub mod backoff;
