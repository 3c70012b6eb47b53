//! Node management subsystem.
//!
//! # Data Flow
//! ```text
//! Configured host list
//!     → node.rs (parse, resolve default ports, HostKey identity)
//!     → selector.rs reconfigure():
//!         - de-duplicate by HostKey
//!         - fresh auth cache (auth::cache)
//!         - empty blacklist
//!         - atomic swap of the whole generation
//!
//! Request outcome (transport):
//!     failure → selector.mark_dead() → dead_host.rs (backoff deadline)
//!     success → selector.mark_alive()
//!
//! Next request:
//!     selector.select() → live nodes round-robin, or the dead node
//!     closest to its retry deadline
//! ```
//!
//! # Design Decisions
//! - Node set, auth cache and blacklist form one generation behind ArcSwap
//! - Reconfigurations are serialized, readers never block
//! - Blacklist recovery uses an explicit, configurable backoff

pub mod dead_host;
pub mod node;
pub mod selector;

pub use dead_host::DeadHostState;
pub use node::{HostKey, Node, Scheme};
pub use selector::{NodeGeneration, NodeSelector};
