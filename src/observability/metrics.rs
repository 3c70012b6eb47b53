//! Metrics collection and exposition.
//!
//! # Metrics
//! - `search_nodes_configured` (gauge): nodes in the current set
//! - `search_nodes_dead` (gauge): nodes currently blacklisted
//! - `search_node_failures_total` (counter): failures by node
//! - `search_reconfigurations_total` (counter): node set replacements
//! - `search_health_status` (gauge): 1=up, 0=down, by indicator
//! - `search_health_checks_total` (counter): checks by indicator, status
//! - `search_transport_errors_total` (counter): transport errors by kind
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::health::HealthStatus;

/// Install the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_nodes_configured(count: usize) {
    ::metrics::gauge!("search_nodes_configured").set(count as f64);
}

pub fn record_dead_nodes(count: usize) {
    ::metrics::gauge!("search_nodes_dead").set(count as f64);
}

pub fn record_node_failure(node: &str) {
    ::metrics::counter!("search_node_failures_total", "node" => node.to_string()).increment(1);
}

pub fn record_reconfiguration() {
    ::metrics::counter!("search_reconfigurations_total").increment(1);
}

pub fn record_transport_error(kind: &'static str) {
    ::metrics::counter!("search_transport_errors_total", "kind" => kind).increment(1);
}

pub fn record_health(indicator: &str, status: HealthStatus) {
    let value = if status.is_up() { 1.0 } else { 0.0 };
    ::metrics::gauge!("search_health_status", "indicator" => indicator.to_string()).set(value);
    ::metrics::counter!(
        "search_health_checks_total",
        "indicator" => indicator.to_string(),
        "status" => status.as_str()
    )
    .increment(1);
}
