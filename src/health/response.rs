//! Typed cluster-health payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ClientError;
use crate::health::result::HealthStatus;

/// Multi-valued cluster status reported by the search cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterStatus {
    #[serde(alias = "GREEN")]
    Green,
    #[serde(alias = "YELLOW")]
    Yellow,
    #[serde(alias = "RED")]
    Red,
}

impl ClusterStatus {
    /// Green and yellow clusters serve requests, red ones do not.
    pub fn health_status(self) -> HealthStatus {
        match self {
            ClusterStatus::Green | ClusterStatus::Yellow => HealthStatus::Up,
            ClusterStatus::Red => HealthStatus::Down,
        }
    }
}

/// Response of `GET /_cluster/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterHealthResponse {
    #[serde(default)]
    pub cluster_name: String,
    pub status: ClusterStatus,
    #[serde(default)]
    pub timed_out: bool,
    #[serde(default)]
    pub number_of_nodes: u32,
    #[serde(default)]
    pub number_of_data_nodes: u32,
    #[serde(default)]
    pub active_primary_shards: u32,
    #[serde(default)]
    pub active_shards: u32,
    #[serde(default)]
    pub relocating_shards: u32,
    #[serde(default)]
    pub initializing_shards: u32,
    #[serde(default)]
    pub unassigned_shards: u32,
    #[serde(default)]
    pub delayed_unassigned_shards: u32,
    #[serde(default)]
    pub number_of_pending_tasks: u32,
    #[serde(default)]
    pub number_of_in_flight_fetch: u32,
    #[serde(default)]
    pub task_max_waiting_in_queue_millis: u64,
    #[serde(default)]
    pub active_shards_percent_as_number: f64,
}

impl ClusterHealthResponse {
    /// Decode the raw JSON body.
    pub fn from_payload(payload: Value) -> Result<Self, ClientError> {
        serde_json::from_value(payload).map_err(|e| ClientError::DetailSerialization(e.to_string()))
    }

    /// Render as a flat key/value snapshot for health details.
    pub fn to_details(&self) -> Result<Map<String, Value>, ClientError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(ClientError::DetailSerialization(format!(
                "expected an object, got {}",
                other
            ))),
            Err(e) => Err(ClientError::DetailSerialization(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(status: &str) -> Value {
        json!({
            "cluster_name": "docker-cluster",
            "status": status,
            "timed_out": false,
            "number_of_nodes": 3,
            "number_of_data_nodes": 3,
            "active_primary_shards": 10,
            "active_shards": 20,
            "relocating_shards": 0,
            "initializing_shards": 0,
            "unassigned_shards": 0,
            "delayed_unassigned_shards": 0,
            "number_of_pending_tasks": 0,
            "number_of_in_flight_fetch": 0,
            "task_max_waiting_in_queue_millis": 0,
            "active_shards_percent_as_number": 100.0
        })
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ClusterStatus::Green.health_status(), HealthStatus::Up);
        assert_eq!(ClusterStatus::Yellow.health_status(), HealthStatus::Up);
        assert_eq!(ClusterStatus::Red.health_status(), HealthStatus::Down);
    }

    #[test]
    fn test_decode_and_render() {
        let response = ClusterHealthResponse::from_payload(payload("yellow")).unwrap();
        assert_eq!(response.status, ClusterStatus::Yellow);
        assert_eq!(response.number_of_nodes, 3);

        let details = response.to_details().unwrap();
        assert_eq!(details["cluster_name"], json!("docker-cluster"));
        assert_eq!(details["status"], json!("yellow"));
        assert_eq!(details["active_shards"], json!(20));
    }

    #[test]
    fn test_uppercase_status_accepted() {
        let response = ClusterHealthResponse::from_payload(json!({"status": "RED"})).unwrap();
        assert_eq!(response.status, ClusterStatus::Red);
        assert_eq!(response.number_of_nodes, 0);
    }

    #[test]
    fn test_malformed_payload() {
        for bad in [json!({"status": "purple"}), json!({"cluster_name": "x"}), json!([1, 2])] {
            let err = ClusterHealthResponse::from_payload(bad).unwrap_err();
            assert!(matches!(err, ClientError::DetailSerialization(_)));
        }
    }
}
