//! Client entry point.
//!
//! # Responsibilities
//! - Build the node selector, transport and health indicator from config
//! - Apply reloaded host lists without rebuilding the client
//!
//! The client is an ordinary value: construct it once and pass it (or an
//! `Arc` of it) to whatever needs cluster access.

use std::sync::Arc;

use crate::config::{validate_config, ClientConfig};
use crate::error::{ClientError, ClientResult};
use crate::health::{ClusterHealthResponse, HealthBridge, HealthProbe};
use crate::nodes::NodeSelector;
use crate::resilience::backoff::DeadHostBackoff;
use crate::transport::HttpTransport;

/// Connection layer to a search cluster.
#[derive(Debug)]
pub struct SearchClient {
    config: ClientConfig,
    selector: Arc<NodeSelector>,
    transport: HttpTransport,
}

impl SearchClient {
    /// Validate `config` and build the client.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        check(&config)?;

        let selector = Arc::new(NodeSelector::with_auth_scheme(
            config.nodes()?,
            DeadHostBackoff::from(&config.dead_hosts),
            config.auth.credentials().scheme(),
        )?);
        let transport = HttpTransport::new(selector.clone(), &config)?;

        tracing::info!(
            nodes = selector.nodes().len(),
            request_timeout_secs = config.timeouts.request_secs,
            health_enabled = config.health.enabled,
            auth_scheme = %config.auth.credentials().scheme(),
            "Search client initialized"
        );

        Ok(Self {
            config,
            selector,
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn selector(&self) -> &Arc<NodeSelector> {
        &self.selector
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    /// The cluster health indicator, unless disabled in config.
    pub fn health_indicator(&self) -> Option<HealthBridge> {
        if !self.config.health.enabled {
            return None;
        }
        let probe = HealthProbe::new(&self.config.health.name, Arc::new(self.transport.clone()));
        Some(HealthBridge::new(probe))
    }

    /// Fetch the typed cluster-health report, failing over across nodes.
    ///
    /// Unlike the health indicator, failures are returned as errors.
    pub async fn cluster_health(&self) -> ClientResult<ClusterHealthResponse> {
        let payload = self.transport.fetch_cluster_health().await?;
        ClusterHealthResponse::from_payload(payload)
    }

    /// Apply a reloaded configuration.
    ///
    /// The host list is swapped in through [`NodeSelector::reconfigure`].
    /// Other sections only take effect when the client is rebuilt.
    pub fn apply_config(&self, config: &ClientConfig) -> ClientResult<()> {
        check(config)?;
        self.selector.reconfigure(config.nodes()?)?;

        if config.timeouts != self.config.timeouts
            || config.auth != self.config.auth
            || config.default_headers != self.config.default_headers
            || config.dead_hosts != self.config.dead_hosts
        {
            tracing::warn!("Only the host list is reloaded live, other changes need a restart");
        }
        Ok(())
    }
}

fn check(config: &ClientConfig) -> ClientResult<()> {
    validate_config(config).map_err(|errors| {
        ClientError::InvalidConfiguration(
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthCache, AuthScheme};
    use crate::error::TransportError;
    use crate::nodes::{Node, Scheme};

    fn config(hosts: &[&str]) -> ClientConfig {
        ClientConfig {
            hosts: hosts.iter().map(|h| h.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_builds_node_set() {
        let client = SearchClient::new(config(&["https://search-1:9200", "https://search-2:9200"])).unwrap();
        assert_eq!(client.selector().nodes().len(), 2);
        assert_eq!(
            client
                .selector()
                .auth_cache()
                .get_for(&Node::new("search-2", Some(9200), Scheme::Https)),
            Some(AuthScheme::Basic)
        );
    }

    #[test]
    fn test_auth_scheme_from_credentials() {
        let mut cfg = config(&["https://search-1:9200"]);
        cfg.auth.api_key = Some("abc".into());
        let client = SearchClient::new(cfg).unwrap();
        let node = Node::new("search-1", Some(9200), Scheme::Https);
        assert_eq!(client.selector().auth_cache().get_for(&node), Some(AuthScheme::ApiKey));

        client.apply_config(&{
            let mut cfg = config(&["https://search-1:9200"]);
            cfg.auth.api_key = Some("abc".into());
            cfg
        })
        .unwrap();
        assert_eq!(client.selector().auth_cache().get_for(&node), Some(AuthScheme::ApiKey));
    }

    #[tokio::test]
    async fn test_cluster_health_surfaces_transport_error() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let host = format!("http://127.0.0.1:{}", port);
        let client = SearchClient::new(config(&[host.as_str()])).unwrap();

        let err = client.cluster_health().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(TransportError::NodesExhausted { .. })));
        assert_eq!(err.kind(), "nodes_exhausted");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = SearchClient::new(config(&[])).unwrap_err();
        assert!(matches!(err, ClientError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_health_indicator_toggle() {
        let mut cfg = config(&["http://localhost:9200"]);
        cfg.health.name = "elasticsearch".into();
        let client = SearchClient::new(cfg.clone()).unwrap();
        assert!(client.health_indicator().is_some());

        cfg.health.enabled = false;
        let client = SearchClient::new(cfg).unwrap();
        assert!(client.health_indicator().is_none());
    }

    #[test]
    fn test_apply_config_swaps_nodes() {
        let client = SearchClient::new(config(&["https://search-1:9200", "https://search-2:9200"])).unwrap();
        client.selector().mark_dead(&Node::new("search-1", Some(9200), Scheme::Https));

        client.apply_config(&config(&["https://search-3:9200"])).unwrap();
        let nodes = client.selector().nodes();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].host(), "search-3");
        assert!(client.selector().dead_hosts().is_empty());
    }

    #[test]
    fn test_apply_invalid_config_keeps_nodes() {
        let client = SearchClient::new(config(&["https://search-1:9200"])).unwrap();
        assert!(client.apply_config(&config(&[])).is_err());
        assert!(client.apply_config(&config(&["gopher://x"])).is_err());
        assert_eq!(client.selector().nodes()[0].host(), "search-1");
    }
}
