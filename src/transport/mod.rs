//! Transport subsystem: the wire-facing search client.
//!
//! # Data Flow
//! ```text
//! HealthProbe
//!     → ClusterHealthApi::cluster_health(callback)
//!     → http.rs: spawn request task
//!         → NodeSelector::select() (live nodes, round-robin)
//!         → per node: GET /_cluster/health
//!             + default headers (headers.rs)
//!             + Authorization from AuthCache + Credentials
//!         → failure: mark_dead, try next node
//!         → success: mark_alive
//!     → callback(Ok(json) | Err(TransportError)), exactly once
//! ```
//!
//! # Design Decisions
//! - Completion is callback based so any I/O layer can sit behind the trait
//! - Timeouts belong to the HTTP client, they surface as TransportError
//! - Only connect errors, timeouts and 502/503/504 blacklist a node

pub mod headers;
pub mod http;

use serde_json::Value;

use crate::error::TransportError;

pub use http::HttpTransport;

/// Completion handler for a cluster-health request.
pub type HealthCallback = Box<dyn FnOnce(Result<Value, TransportError>) + Send + 'static>;

/// Asynchronous cluster-health probe offered by the search client.
pub trait ClusterHealthApi: Send + Sync {
    /// Issue one cluster-health request.
    ///
    /// Implementations call `on_complete` at most once, from any thread.
    /// Dropping it without a call is reported by the caller as a failure.
    fn cluster_health(&self, on_complete: HealthCallback);
}
