//! HTTP transport with node failover.

use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::auth::{AuthCache, Credentials};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult, TransportError};
use crate::nodes::{Node, NodeSelector};
use crate::observability::metrics;
use crate::transport::headers::parse_default_headers;
use crate::transport::{ClusterHealthApi, HealthCallback};

/// Path of the cluster-health endpoint.
pub const CLUSTER_HEALTH_PATH: &str = "/_cluster/health";

/// Request correlation header understood by the cluster.
pub const OPAQUE_ID_HEADER: &str = "x-opaque-id";

/// reqwest-backed transport routing through a [`NodeSelector`].
#[derive(Clone)]
pub struct HttpTransport {
    inner: Arc<Inner>,
}

struct Inner {
    selector: Arc<NodeSelector>,
    client: reqwest::Client,
    credentials: Credentials,
}

impl HttpTransport {
    /// Create a transport from configuration.
    pub fn new(selector: Arc<NodeSelector>, config: &ClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .default_headers(parse_default_headers(&config.default_headers)?)
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .build()
            .map_err(|e| ClientError::InvalidConfiguration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(selector, client, config.auth.credentials()))
    }

    /// Create a transport around a prepared `reqwest::Client`.
    pub fn with_client(
        selector: Arc<NodeSelector>,
        client: reqwest::Client,
        credentials: Credentials,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                selector,
                client,
                credentials,
            }),
        }
    }

    pub fn selector(&self) -> &Arc<NodeSelector> {
        &self.inner.selector
    }

    /// Fetch cluster health, failing over across live nodes.
    pub async fn fetch_cluster_health(&self) -> Result<Value, TransportError> {
        self.inner.fetch().await
    }
}

impl Inner {
    async fn fetch(&self) -> Result<Value, TransportError> {
        let candidates = self.selector.select();
        let mut attempts = 0;
        let mut last = None;

        for node in candidates {
            attempts += 1;
            match self.send(&node).await {
                Ok(body) => {
                    self.selector.mark_alive(&node);
                    return Ok(body);
                }
                Err(e) if e.is_node_failure() => {
                    tracing::warn!(node = %node, attempt = attempts, error = %e, "Request failed, trying next node");
                    metrics::record_transport_error(e.kind());
                    self.selector.mark_dead(&node);
                    last = Some(e);
                }
                Err(e @ TransportError::Request { .. }) => {
                    // Blacklist state is left unchanged for incomplete requests.
                    tracing::warn!(node = %node, attempt = attempts, error = %e, "Request not completed, trying next node");
                    metrics::record_transport_error(e.kind());
                    last = Some(e);
                }
                Err(e) => {
                    // The node answered, so it is reachable.
                    self.selector.mark_alive(&node);
                    metrics::record_transport_error(e.kind());
                    return Err(e);
                }
            }
        }

        let last = last.unwrap_or_else(|| TransportError::Unavailable("no nodes to try".to_string()));
        Err(TransportError::NodesExhausted {
            attempts,
            last: Box::new(last),
        })
    }

    async fn send(&self, node: &Node) -> Result<Value, TransportError> {
        let url = format!("{}{}", node.base_url(), CLUSTER_HEALTH_PATH);
        let request_id = Uuid::new_v4().to_string();

        let mut request = self
            .client
            .get(&url)
            .header(OPAQUE_ID_HEADER, request_id.as_str());

        if !self.credentials.is_empty() {
            let auth_cache = self.selector.auth_cache();
            if let Some(value) = auth_cache
                .get_for(node)
                .and_then(|scheme| self.credentials.authorization(scheme))
            {
                request = request.header(AUTHORIZATION, value);
            }
        }

        tracing::debug!(node = %node, request_id = %request_id, "Requesting cluster health");

        let response = request.send().await.map_err(|e| classify(node, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                node: node.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| classify(node, e))?;
        serde_json::from_slice(&body).map_err(|e| TransportError::InvalidResponse {
            node: node.to_string(),
            message: e.to_string(),
        })
    }
}

fn classify(node: &Node, err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout {
            node: node.to_string(),
        }
    } else if err.is_connect() {
        TransportError::Connect {
            node: node.to_string(),
            message: err.to_string(),
        }
    } else if err.is_request() || err.is_builder() {
        TransportError::Request {
            node: node.to_string(),
            message: err.to_string(),
        }
    } else {
        TransportError::InvalidResponse {
            node: node.to_string(),
            message: err.to_string(),
        }
    }
}

impl ClusterHealthApi for HttpTransport {
    fn cluster_health(&self, on_complete: HealthCallback) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                on_complete(Err(TransportError::Unavailable(format!("no async runtime: {}", e))));
                return;
            }
        };

        let inner = self.inner.clone();
        handle.spawn(async move {
            let outcome = inner.fetch().await;
            on_complete(outcome);
        });
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("nodes", &self.inner.selector.nodes().len())
            .field("credentials", &self.inner.credentials)
            .finish()
    }
}
