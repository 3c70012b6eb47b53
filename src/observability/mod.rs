//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (node marked dead, reconfigured, health results)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout), installed by the binary
//!     → Metrics endpoint (Prometheus scrape), when enabled
//! ```
//!
//! # Design Decisions
//! - The library only emits; installing subscribers/recorders is the
//!   application's call
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
