//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → SearchClient::new
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → SearchClient::apply_config → NodeSelector::reconfigure
//! ```
//!
//! # Design Decisions
//! - A loaded ClientConfig is never mutated; a reload produces a new one
//! - All fields have defaults to allow minimal configs
//! - An invalid reload is logged and the running configuration is kept

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AuthConfig, ClientConfig, DeadHostConfig, HealthConfig, ObservabilityConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
pub use watcher::ConfigWatcher;
