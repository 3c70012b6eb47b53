//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files and
//! every field has a default, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::auth::Credentials;
use crate::error::ClientResult;
use crate::nodes::Node;

/// Root configuration for the search client.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Cluster node URLs (e.g., "https://search-1:9200").
    pub hosts: Vec<String>,

    /// Headers sent with every request, as "Name:Value".
    pub default_headers: Vec<String>,

    /// Credentials for the per-node auth schemes.
    pub auth: AuthConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Dead-host recovery policy.
    pub dead_hosts: DeadHostConfig,

    /// Health indicator settings.
    pub health: HealthConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            hosts: vec!["http://127.0.0.1:9200".to_string()],
            default_headers: Vec::new(),
            auth: AuthConfig::default(),
            timeouts: TimeoutConfig::default(),
            dead_hosts: DeadHostConfig::default(),
            health: HealthConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Parse `hosts` into nodes, failing on the first bad entry.
    pub fn nodes(&self) -> ClientResult<Vec<Node>> {
        self.hosts.iter().map(|h| Node::parse(h)).collect()
    }
}

/// Authentication configuration.
#[derive(Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AuthConfig {
    /// Username for Basic auth.
    pub username: Option<String>,

    /// Password for Basic auth.
    pub password: Option<String>,

    /// Encoded API key.
    pub api_key: Option<String>,

    /// Bearer token.
    pub bearer_token: Option<String>,
}

impl AuthConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
            api_key: self.api_key.clone(),
            bearer_token: self.bearer_token.clone(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.credentials().fmt(f)
    }
}

/// Timeout configuration for cluster requests.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// How long a failed node stays blacklisted.
///
/// The n-th consecutive failure excludes the node for
/// `min(max_delay_ms, base_delay_ms * 2^(n-1))` plus up to 10% jitter.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeadHostConfig {
    /// Exclusion after the first failure, in milliseconds.
    pub base_delay_ms: u64,

    /// Upper bound on exclusion, in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for DeadHostConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 60_000,
            max_delay_ms: 1_800_000,
        }
    }
}

/// Health indicator configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct HealthConfig {
    /// Enable the cluster health indicator.
    pub enabled: bool,

    /// Indicator name reported with each result.
    pub name: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name: "search".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
