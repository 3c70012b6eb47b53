//! Error types for the client layer.
//!
//! Only [`ClientError::InvalidConfiguration`] ever escapes as a hard failure.
//! Everything on the health-check path is folded into a DOWN result.

use thiserror::Error;

/// Errors surfaced by the client layer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A node list or config value was rejected before any state changed.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The cluster could not be reached.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The health payload could not be rendered into result details.
    #[error("Failed to render health details: {0}")]
    DetailSerialization(String),
}

impl ClientError {
    /// Get the error kind as a string for metrics labeling.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::InvalidConfiguration(_) => "invalid_configuration",
            ClientError::Transport(e) => e.kind(),
            ClientError::DetailSerialization(_) => "detail_serialization",
        }
    }
}

/// Network-level failures reported by a transport.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Connection could not be established or was reset.
    #[error("Connection to {node} failed: {message}")]
    Connect { node: String, message: String },

    /// The node did not answer within the request timeout.
    #[error("Request to {node} timed out")]
    Timeout { node: String },

    /// The request was built or sent but never completed, e.g. the
    /// connection closed before a response arrived.
    #[error("Request to {node} failed: {message}")]
    Request { node: String, message: String },

    /// The node answered with a non-success HTTP status.
    #[error("Node {node} returned HTTP {status}")]
    Status { node: String, status: u16 },

    /// The response body was not valid JSON.
    #[error("Invalid response from {node}: {message}")]
    InvalidResponse { node: String, message: String },

    /// Every candidate node failed.
    #[error("All {attempts} node(s) failed, last error: {last}")]
    NodesExhausted {
        attempts: usize,
        last: Box<TransportError>,
    },

    /// No request could be issued at all.
    #[error("Transport unavailable: {0}")]
    Unavailable(String),

    /// The completion callback was dropped without being invoked.
    #[error("Health probe completion was dropped")]
    Dropped,
}

impl TransportError {
    /// Get the error kind as a string for metrics labeling.
    pub fn kind(&self) -> &'static str {
        match self {
            TransportError::Connect { .. } => "connect",
            TransportError::Timeout { .. } => "timeout",
            TransportError::Request { .. } => "request",
            TransportError::Status { .. } => "status",
            TransportError::InvalidResponse { .. } => "invalid_response",
            TransportError::NodesExhausted { .. } => "nodes_exhausted",
            TransportError::Unavailable(_) => "unavailable",
            TransportError::Dropped => "dropped",
        }
    }

    /// Whether this failure means the node should be blacklisted.
    ///
    /// Gateway errors (502/503/504) count, other statuses do not.
    pub fn is_node_failure(&self) -> bool {
        match self {
            TransportError::Connect { .. } | TransportError::Timeout { .. } => true,
            TransportError::Status { status, .. } => matches!(*status, 502..=504),
            _ => false,
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
