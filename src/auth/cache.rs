//! Per-host authentication cache.

use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;

use crate::auth::scheme::AuthScheme;
use crate::nodes::{HostKey, Node};

/// Lookup of the auth scheme to use for a host.
///
/// Implementations must be safe to share across threads without external
/// locking. Keys are normalized through [`HostKey`] before every access.
pub trait AuthCache: Send + Sync + fmt::Debug {
    /// Store `scheme` for `host`. `None` is ignored.
    fn put(&self, host: &HostKey, scheme: Option<AuthScheme>);

    fn get(&self, host: &HostKey) -> Option<AuthScheme>;

    fn remove(&self, host: &HostKey);

    fn clear(&self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convenience lookup by node.
    fn get_for(&self, node: &Node) -> Option<AuthScheme> {
        self.get(node.key())
    }
}

/// In-memory concurrent auth cache.
///
/// Entries live only in this process and are never written out.
#[derive(Clone, Default)]
pub struct ConcurrentAuthCache {
    inner: Arc<DashMap<HostKey, AuthScheme>>,
}

impl ConcurrentAuthCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache holding `scheme` for every node.
    pub fn for_nodes<'a>(nodes: impl IntoIterator<Item = &'a Node>, scheme: AuthScheme) -> Self {
        let cache = Self::new();
        for node in nodes {
            cache.put(node.key(), Some(scheme));
        }
        cache
    }
}

impl AuthCache for ConcurrentAuthCache {
    fn put(&self, host: &HostKey, scheme: Option<AuthScheme>) {
        if let Some(scheme) = scheme {
            self.inner.insert(host.clone(), scheme);
        }
    }

    fn get(&self, host: &HostKey) -> Option<AuthScheme> {
        self.inner.get(host).map(|r| *r.value())
    }

    fn remove(&self, host: &HostKey) {
        self.inner.remove(host);
    }

    fn clear(&self) {
        self.inner.clear();
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl fmt::Debug for ConcurrentAuthCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for r in self.inner.iter() {
            map.entry(&r.key().to_string(), r.value());
        }
        map.finish()
    }
}
