//! Authentication subsystem.
//!
//! # Data Flow
//! ```text
//! NodeSelector::reconfigure(nodes)
//!     → cache.rs (one default scheme per node, keyed by resolved HostKey)
//!
//! Outgoing request to node N:
//!     → cache.rs lookup(N.key)
//!     → scheme.rs Credentials::authorization(scheme)
//!     → Authorization header (or none)
//! ```
//!
//! # Design Decisions
//! - Plain concurrent map keyed by value, nothing is ever serialized
//! - Ports are resolved before every put/get so `host` and `host:443` agree
//! - Secrets live in `Credentials`, the cache only records the scheme

pub mod cache;
pub mod scheme;

pub use cache::{AuthCache, ConcurrentAuthCache};
pub use scheme::{AuthScheme, Credentials};
