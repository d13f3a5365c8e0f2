//! Error types for nxnk-core.

use thiserror::Error;

use crate::engine::EngineHandle;

/// Result type alias for nxnk-core operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors that can occur while translating or mutating a graph.
///
/// Node identifiers are carried in their `Debug` rendering so the error type
/// stays independent of the node type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// The node has never been registered (or was removed).
    #[error("Unknown node: {node}")]
    UnknownNode {
        /// Debug rendering of the missing node.
        node: String,
    },

    /// No node is registered under this engine handle.
    #[error("Unknown engine handle: {handle}")]
    UnknownHandle {
        /// The handle that missed.
        handle: EngineHandle,
    },

    /// The engine returned a handle that is already mapped to another node.
    #[error("Engine returned handle {handle} which is already mapped to {existing}")]
    DuplicateHandle {
        /// The reused handle.
        handle: EngineHandle,
        /// Debug rendering of the node already holding the handle.
        existing: String,
    },

    /// No edge connects the two nodes.
    #[error("No edge between {source_node} and {target_node}")]
    UnknownEdge {
        /// Debug rendering of the source node.
        source_node: String,
        /// Debug rendering of the target node.
        target_node: String,
    },

    /// Self loops are rejected by the graph configuration.
    #[error("Self loops are not allowed: {node}")]
    SelfLoop {
        /// Debug rendering of the node.
        node: String,
    },

    /// Edge weights must be non-negative numbers.
    #[error("Invalid edge weight: {weight}")]
    InvalidWeight {
        /// The rejected weight.
        weight: f64,
    },

    /// A shared graph lock was poisoned by a panicking writer.
    #[error("Graph lock poisoned")]
    Poisoned,

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

impl GraphError {
    pub(crate) fn unknown_node<N: std::fmt::Debug>(node: &N) -> Self {
        GraphError::UnknownNode {
            node: format!("{:?}", node),
        }
    }

    pub(crate) fn unknown_edge<N: std::fmt::Debug>(source: &N, target: &N) -> Self {
        GraphError::UnknownEdge {
            source_node: format!("{:?}", source),
            target_node: format!("{:?}", target),
        }
    }

    /// Whether this error reports a lookup miss rather than a policy violation.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            GraphError::UnknownNode { .. }
                | GraphError::UnknownHandle { .. }
                | GraphError::UnknownEdge { .. }
        )
    }
}

impl From<std::io::Error> for GraphError {
    fn from(err: std::io::Error) -> Self {
        GraphError::Config {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for GraphError {
    fn from(err: toml::de::Error) -> Self {
        GraphError::Config {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::Config {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GraphError::unknown_node(&"alpha");
        assert!(err.to_string().contains("\"alpha\""));

        let err = GraphError::UnknownHandle { handle: 42 };
        assert!(err.to_string().contains("42"));

        let err = GraphError::unknown_edge(&1, &2);
        assert!(err.to_string().contains('1'));
        assert!(err.to_string().contains('2'));
    }

    #[test]
    fn test_lookup_miss_classification() {
        assert!(GraphError::unknown_node(&"x").is_lookup_miss());
        assert!(GraphError::UnknownHandle { handle: 0 }.is_lookup_miss());
        assert!(!GraphError::InvalidWeight { weight: -1.0 }.is_lookup_miss());
        assert!(!GraphError::SelfLoop { node: "x".into() }.is_lookup_miss());
    }
}
