//! Binary health result handed to monitoring callers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Simplified up/down signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Up,
    Down,
}

impl HealthStatus {
    pub fn is_up(self) -> bool {
        self == HealthStatus::Up
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Up => "UP",
            HealthStatus::Down => "DOWN",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one health check. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResult {
    name: String,
    status: HealthStatus,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    details: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cause: Option<String>,
}

impl HealthResult {
    /// Healthy result carrying a snapshot of cluster metrics.
    pub fn up(name: impl Into<String>, details: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Up,
            details,
            cause: None,
        }
    }

    /// Unhealthy result with details but no failure (e.g. a red cluster).
    pub fn down(name: impl Into<String>, details: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Down,
            details,
            cause: None,
        }
    }

    /// Unhealthy result caused by an error.
    pub fn failed(name: impl Into<String>, cause: impl fmt::Display) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Down,
            details: Map::new(),
            cause: Some(cause.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> HealthStatus {
        self.status
    }

    pub fn details(&self) -> &Map<String, Value> {
        &self.details
    }

    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }
}
