//! Authoritative node set and dead-host blacklist.
//!
//! # Responsibilities
//! - Own the de-duplicated node list
//! - Track which nodes are blacklisted and when they may be retried
//! - Rebuild the auth cache whenever the node list changes
//! - Yield live nodes in round-robin order for the transport

use arc_swap::ArcSwap;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::auth::{AuthScheme, ConcurrentAuthCache};
use crate::error::{ClientError, ClientResult};
use crate::nodes::dead_host::DeadHostState;
use crate::nodes::node::{HostKey, Node};
use crate::observability::metrics;
use crate::resilience::backoff::DeadHostBackoff;

/// One consistent view of the node set, its auth cache and its blacklist.
///
/// A generation is replaced as a whole on reconfiguration, so a reader
/// holding one never sees nodes from one configuration paired with auth or
/// blacklist state from another.
#[derive(Debug)]
pub struct NodeGeneration {
    generation: u64,
    nodes: Vec<Node>,
    auth_cache: Arc<ConcurrentAuthCache>,
    blacklist: DashMap<HostKey, DeadHostState>,
}

impl NodeGeneration {
    fn new(generation: u64, nodes: Vec<Node>, scheme: AuthScheme) -> Self {
        let auth_cache = Arc::new(ConcurrentAuthCache::for_nodes(&nodes, scheme));
        Self {
            generation,
            nodes,
            auth_cache,
            blacklist: DashMap::new(),
        }
    }

    /// Monotonic counter, bumped by every successful reconfiguration.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn auth_cache(&self) -> &Arc<ConcurrentAuthCache> {
        &self.auth_cache
    }

    pub fn contains(&self, key: &HostKey) -> bool {
        self.nodes.iter().any(|n| n.key() == key)
    }

    pub fn is_dead(&self, key: &HostKey) -> bool {
        self.blacklist.contains_key(key)
    }

    pub fn dead_count(&self) -> usize {
        self.blacklist.len()
    }
}

/// Manages the cluster node set.
#[derive(Debug)]
pub struct NodeSelector {
    current: ArcSwap<NodeGeneration>,
    /// Serializes reconfigurations.
    reconfigure_lock: Mutex<()>,
    backoff: DeadHostBackoff,
    /// Scheme installed for every node on (re)configuration.
    auth_scheme: AuthScheme,
    counter: AtomicUsize,
}

impl NodeSelector {
    /// Create a selector from an initial node list, using Basic auth.
    pub fn new(
        nodes: impl IntoIterator<Item = Node>,
        backoff: DeadHostBackoff,
    ) -> ClientResult<Self> {
        Self::with_auth_scheme(nodes, backoff, AuthScheme::default())
    }

    /// Create a selector whose auth cache maps every node to `auth_scheme`.
    pub fn with_auth_scheme(
        nodes: impl IntoIterator<Item = Node>,
        backoff: DeadHostBackoff,
        auth_scheme: AuthScheme,
    ) -> ClientResult<Self> {
        let nodes = dedupe(nodes)?;
        metrics::record_nodes_configured(nodes.len());

        Ok(Self {
            current: ArcSwap::from_pointee(NodeGeneration::new(1, nodes, auth_scheme)),
            reconfigure_lock: Mutex::new(()),
            backoff,
            auth_scheme,
            counter: AtomicUsize::new(0),
        })
    }

    /// Replace the node set.
    ///
    /// Fails on an empty collection and leaves every piece of state untouched.
    /// Otherwise swaps in a new node list, an empty blacklist and a freshly
    /// populated auth cache in one step.
    pub fn reconfigure(&self, nodes: impl IntoIterator<Item = Node>) -> ClientResult<()> {
        let nodes = dedupe(nodes)?;

        let _guard = self
            .reconfigure_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let previous = self.current.load();
        let next = NodeGeneration::new(previous.generation + 1, nodes, self.auth_scheme);

        tracing::info!(
            generation = next.generation,
            nodes = next.nodes.len(),
            cleared_dead = previous.dead_count(),
            "Node set reconfigured"
        );
        metrics::record_reconfiguration();
        metrics::record_nodes_configured(next.nodes.len());
        metrics::record_dead_nodes(0);

        self.current.store(Arc::new(next));
        Ok(())
    }

    /// Consistent snapshot of the current generation.
    pub fn snapshot(&self) -> Arc<NodeGeneration> {
        self.current.load_full()
    }

    pub fn nodes(&self) -> Vec<Node> {
        self.current.load().nodes.clone()
    }

    pub fn auth_cache(&self) -> Arc<ConcurrentAuthCache> {
        self.current.load().auth_cache.clone()
    }

    /// Blacklist a node after a failed request.
    ///
    /// Repeated failures push the retry deadline further out. Nodes that are
    /// not part of the current set are ignored.
    pub fn mark_dead(&self, node: impl AsRef<HostKey>) {
        let key = node.as_ref();
        let current = self.current.load();
        if !current.contains(key) {
            tracing::debug!(node = %key, "Ignoring failure for node outside current set");
            return;
        }

        let state = current
            .blacklist
            .entry(key.clone())
            .and_modify(|state| *state = state.next(&self.backoff))
            .or_insert_with(|| DeadHostState::new(&self.backoff))
            .clone();

        tracing::warn!(
            node = %key,
            failures = state.failures(),
            retry_in = ?state.remaining(Instant::now()),
            "Node marked dead"
        );
        metrics::record_node_failure(&key.to_string());
        metrics::record_dead_nodes(current.dead_count());
    }

    /// Remove a node from the blacklist after a successful request.
    pub fn mark_alive(&self, node: impl AsRef<HostKey>) {
        let key = node.as_ref();
        let current = self.current.load();
        if current.blacklist.remove(key).is_some() {
            tracing::info!(node = %key, "Node revived");
            metrics::record_dead_nodes(current.dead_count());
        }
    }

    pub fn is_dead(&self, node: impl AsRef<HostKey>) -> bool {
        self.current.load().is_dead(node.as_ref())
    }

    /// Blacklisted nodes with their state, in node-set order.
    pub fn dead_hosts(&self) -> Vec<(Node, DeadHostState)> {
        let current = self.current.load();
        current
            .nodes
            .iter()
            .filter_map(|n| {
                current
                    .blacklist
                    .get(n.key())
                    .map(|s| (n.clone(), s.value().clone()))
            })
            .collect()
    }

    /// Nodes to try for the next request, in order.
    ///
    /// Live nodes and dead nodes whose retry deadline has passed are yielded
    /// round-robin. When none qualify, the dead node closest to its deadline
    /// is returned alone so a request is still attempted.
    pub fn select(&self) -> Vec<Node> {
        let current = self.current.load();
        let now = Instant::now();
        let len = current.nodes.len();
        let start = self.counter.fetch_add(1, Ordering::Relaxed);

        let live: Vec<Node> = (0..len)
            .map(|i| &current.nodes[(start + i) % len])
            .filter(|n| match current.blacklist.get(n.key()) {
                Some(state) => state.is_retry_due(now),
                None => true,
            })
            .cloned()
            .collect();

        if !live.is_empty() {
            return live;
        }

        let fallback = current
            .nodes
            .iter()
            .filter_map(|n| current.blacklist.get(n.key()).map(|s| (n, s.retry_at())))
            .min_by_key(|(_, retry_at)| *retry_at)
            .map(|(n, _)| n.clone());

        tracing::debug!(nodes = len, "All nodes dead, trying the one closest to retry");
        fallback.into_iter().collect()
    }
}

impl AsRef<HostKey> for Node {
    fn as_ref(&self) -> &HostKey {
        self.key()
    }
}

impl AsRef<HostKey> for HostKey {
    fn as_ref(&self) -> &HostKey {
        self
    }
}

/// Drop duplicate hosts. A repeated host keeps its first position and its
/// last value.
fn dedupe(nodes: impl IntoIterator<Item = Node>) -> ClientResult<Vec<Node>> {
    let mut order: Vec<HostKey> = Vec::new();
    let mut by_key: HashMap<HostKey, Node> = HashMap::new();

    for node in nodes {
        let key = node.key().clone();
        if by_key.insert(key.clone(), node).is_none() {
            order.push(key);
        }
    }

    if order.is_empty() {
        return Err(ClientError::InvalidConfiguration(
            "nodes must not be empty".to_string(),
        ));
    }

    Ok(order
        .into_iter()
        .filter_map(|key| by_key.remove(&key))
        .collect())
}
