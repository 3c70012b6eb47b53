//! Single cluster-health check.
//!
//! # Responsibilities
//! - Issue exactly one cluster-health request per check
//! - Map green/yellow to UP and red to DOWN
//! - Turn transport and detail-rendering failures into DOWN results

use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::{ClientError, TransportError};
use crate::health::response::ClusterHealthResponse;
use crate::health::result::{HealthResult, HealthStatus};
use crate::observability::metrics;
use crate::transport::ClusterHealthApi;

/// Issues cluster-health requests and classifies their outcome.
#[derive(Clone)]
pub struct HealthProbe {
    name: String,
    api: Arc<dyn ClusterHealthApi>,
}

impl HealthProbe {
    pub fn new(name: impl Into<String>, api: Arc<dyn ClusterHealthApi>) -> Self {
        Self {
            name: name.into(),
            api,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run one check. `on_result` fires once, on whatever thread the
    /// transport completes on.
    pub fn check_health<F>(&self, on_result: F)
    where
        F: FnOnce(HealthResult) + Send + 'static,
    {
        let name = self.name.clone();
        self.api.cluster_health(Box::new(move |outcome| {
            on_result(classify(&name, outcome));
        }));
    }
}

impl std::fmt::Debug for HealthProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthProbe").field("name", &self.name).finish()
    }
}

/// Map a transport outcome to a health result.
pub fn classify(name: &str, outcome: Result<Value, TransportError>) -> HealthResult {
    let result = match outcome {
        Ok(payload) => match render(payload) {
            Ok((HealthStatus::Up, details)) => HealthResult::up(name, details),
            Ok((HealthStatus::Down, details)) => HealthResult::down(name, details),
            Err(e) => {
                tracing::warn!(indicator = %name, error = %e, "Cluster health payload could not be rendered");
                HealthResult::failed(name, e)
            }
        },
        Err(e) => {
            tracing::warn!(indicator = %name, error = %e, "Cluster health request failed");
            HealthResult::failed(name, e)
        }
    };

    tracing::debug!(indicator = %name, status = %result.status(), "Health check complete");
    metrics::record_health(name, result.status());
    result
}

fn render(payload: Value) -> Result<(HealthStatus, Map<String, Value>), ClientError> {
    let response = ClusterHealthResponse::from_payload(payload)?;
    let details = response.to_details()?;
    Ok((response.status.health_status(), details))
}
