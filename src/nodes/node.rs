//! Cluster node abstraction.
//!
//! # Responsibilities
//! - Represent a single addressable search node (host, port, scheme)
//! - Resolve an unset port to the scheme's conventional default
//! - Provide the normalized identity used by the node set and auth cache

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::ClientError;

/// URL scheme a node is reached through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    /// Conventional port for the scheme.
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl FromStr for Scheme {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            other => Err(ClientError::InvalidConfiguration(format!(
                "unsupported scheme '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved identity of a node: lowercased host, concrete port, scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostKey {
    host: String,
    port: u16,
    scheme: Scheme,
}

impl HostKey {
    /// Build a key, resolving an unset or zero port through the scheme.
    pub fn new(host: &str, port: Option<u16>, scheme: Scheme) -> Self {
        let port = match port {
            Some(p) if p > 0 => p,
            _ => scheme.default_port(),
        };
        Self {
            host: host.to_ascii_lowercase(),
            port,
            scheme,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }
}

impl fmt::Display for HostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}", self.scheme, self.host, self.port)
    }
}

/// A single search cluster node. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    host: String,
    port: Option<u16>,
    scheme: Scheme,
    key: HostKey,
}

impl Node {
    /// Create a node. A port of `None` or `Some(0)` is resolved via the scheme.
    pub fn new(host: impl Into<String>, port: Option<u16>, scheme: Scheme) -> Self {
        let host = host.into();
        let key = HostKey::new(&host, port, scheme);
        Self {
            host,
            port,
            scheme,
            key,
        }
    }

    /// Parse a node from a URL such as `https://search-1:9200`.
    ///
    /// A bare `host:port` is read as `http`.
    pub fn parse(input: &str) -> Result<Self, ClientError> {
        let trimmed = input.trim();
        let with_scheme = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("http://{}", trimmed)
        };

        let url = Url::parse(&with_scheme).map_err(|e| {
            ClientError::InvalidConfiguration(format!("invalid host '{}': {}", input, e))
        })?;
        let scheme: Scheme = url.scheme().parse()?;
        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ClientError::InvalidConfiguration(format!("host '{}' has no hostname", input)))?;

        // `Url` drops the port when it equals the scheme default, which is the
        // same node after resolution.
        Ok(Self::new(host, url.port(), scheme))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// The configured port, if any.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// The port requests are sent to.
    pub fn resolved_port(&self) -> u16 {
        self.key.port
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Normalized identity of this node.
    pub fn key(&self) -> &HostKey {
        &self.key
    }

    /// Base URL for requests to this node.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.resolved_port())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}

impl FromStr for Node {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Node::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port_resolution() {
        let http = Node::new("search-1", None, Scheme::Http);
        assert_eq!(http.resolved_port(), 80);
        assert_eq!(http.port(), None);

        let https = Node::new("search-1", Some(0), Scheme::Https);
        assert_eq!(https.resolved_port(), 443);

        let explicit = Node::new("search-1", Some(9200), Scheme::Https);
        assert_eq!(explicit.resolved_port(), 9200);
    }

    #[test]
    fn test_key_normalization() {
        let a = HostKey::new("Search-1", None, Scheme::Https);
        let b = HostKey::new("search-1", Some(443), Scheme::Https);
        assert_eq!(a, b);

        let c = HostKey::new("search-1", Some(443), Scheme::Http);
        assert_ne!(a, c);
    }

    #[test]
    fn test_parse_url() {
        let node = Node::parse("https://search-1:9200").unwrap();
        assert_eq!(node.host(), "search-1");
        assert_eq!(node.resolved_port(), 9200);
        assert_eq!(node.scheme(), Scheme::Https);
        assert_eq!(node.base_url(), "https://search-1:9200");

        let bare: Node = "localhost:9200".parse().unwrap();
        assert_eq!(bare.scheme(), Scheme::Http);
        assert_eq!(bare.resolved_port(), 9200);

        let default_port = Node::parse("https://search-2").unwrap();
        assert_eq!(default_port.resolved_port(), 443);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Node::parse("ftp://search-1:21").is_err());
        assert!(Node::parse("http://").is_err());
    }
}
