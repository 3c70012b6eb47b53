//! Client-side connection layer for a distributed search cluster.
//!
//! # Architecture Overview
//!
//! ```text
//!   Monitoring caller                     Configuration (TOML, hot reload)
//!         │                                          │
//!         ▼                                          ▼
//!   ┌──────────────┐                        ┌────────────────┐
//!   │ HealthBridge │                        │  SearchClient  │
//!   │ (one result) │                        └───────┬────────┘
//!   └──────┬───────┘                                │ reconfigure
//!          ▼                                        ▼
//!   ┌──────────────┐   select / mark_dead   ┌────────────────┐
//!   │ HealthProbe  │──────┐                 │  NodeSelector  │
//!   └──────┬───────┘      │                 │ nodes+blacklist│
//!          │ callback     ▼                 └───────┬────────┘
//!          ▼        ┌──────────────┐                │ rebuild
//!   ┌──────────────┐│ HttpTransport│◀───────────────┤
//!   │ClusterHealth ││   (reqwest)  │                ▼
//!   │    Api       │└──────────────┘        ┌────────────────┐
//!   └──────────────┘                        │   AuthCache    │
//!                                           └────────────────┘
//! ```

// Core subsystems
pub mod auth;
pub mod health;
pub mod nodes;
pub mod transport;

// Cross-cutting concerns
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

mod client;

pub use client::SearchClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, TransportError};
pub use health::{HealthBridge, HealthIndicator, HealthResult, HealthStatus};
pub use nodes::{Node, NodeSelector, Scheme};
