//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Watch mode (search-health watch):
//!     Load config → SearchClient::new → periodic checks + config reload
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C → broadcast → loops exit → process ends
//! ```
//!
//! The library itself starts no background tasks; only the binary's watch
//! mode runs long enough to need coordinated shutdown.

pub mod shutdown;

pub use shutdown::Shutdown;
