//! Cluster health subsystem.
//!
//! # Data Flow
//! ```text
//! Monitoring caller
//!     → bridge.rs HealthBridge::subscribe()
//!     → probe.rs HealthProbe::check_health(callback)
//!     → transport ClusterHealthApi::cluster_health(callback)
//!     → (network completes or fails)
//!     → probe.rs classify():
//!         green / yellow → UP + details (response.rs)
//!         red            → DOWN + details
//!         bad payload    → DOWN + cause
//!         transport err  → DOWN + cause
//!     → bridge.rs oneshot → HealthSubscription yields one result, ends
//! ```
//!
//! # Design Decisions
//! - Health checks never fail the caller; every failure is a DOWN result
//! - One request and one result per subscription
//! - No background polling, every check is caller driven

pub mod bridge;
pub mod probe;
pub mod response;
pub mod result;

pub use bridge::{HealthBridge, HealthIndicator, HealthSubscription};
pub use probe::HealthProbe;
pub use response::{ClusterHealthResponse, ClusterStatus};
pub use result::{HealthResult, HealthStatus};
