//! Error types for graph operations.

// Rust 1.92 compiler bug: false positives for thiserror/miette derive macro fields
// https://github.com/rust-lang/rust/issues/147648
#![allow(unused_assignments)]

use miette::Diagnostic;
use std::fmt::Debug;
use thiserror::Error;

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during graph operations.
///
/// Node values are rendered with their `Debug` representation so the error
/// type stays independent of the graph's node type.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum Error {
    /// The operation referenced a node that is not in the graph.
    #[error("Node {node} not found in graph")]
    #[diagnostic(code(graphkit::node_not_found))]
    NodeNotFound {
        /// The missing node.
        node: String,
    },

    /// The operation referenced an edge that is not in the graph.
    #[error("Edge ({from}, {to}) not found in graph")]
    #[diagnostic(code(graphkit::edge_not_found))]
    EdgeNotFound {
        /// Source endpoint of the missing edge.
        from: String,
        /// Target endpoint of the missing edge.
        to: String,
    },

    /// The operation is meaningless for the graph's directed/weighted configuration.
    #[error("Invalid operation '{operation}': {reason}")]
    #[diagnostic(
        code(graphkit::invalid_operation),
        help("Check whether the graph was constructed as directed and/or weighted")
    )]
    InvalidOperation {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Why the operation was rejected.
        reason: String,
    },

    /// A cycle was found where an acyclic graph is required.
    #[error("Graph contains a cycle through node {node}")]
    #[diagnostic(
        code(graphkit::cyclic_graph),
        help("Use is_dag() to test for cycles before sorting")
    )]
    CyclicGraph {
        /// A node that lies on the detected cycle.
        node: String,
    },
}

impl Error {
    /// Create a node-not-found error.
    #[must_use]
    pub fn node_not_found(node: &impl Debug) -> Self {
        Self::NodeNotFound {
            node: format!("{node:?}"),
        }
    }

    /// Create an edge-not-found error.
    #[must_use]
    pub fn edge_not_found(from: &impl Debug, to: &impl Debug) -> Self {
        Self::EdgeNotFound {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }

    /// Create an invalid-operation error.
    #[must_use]
    pub fn invalid_operation(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOperation {
            operation,
            reason: reason.into(),
        }
    }

    /// Create a cyclic-graph error naming a node on the cycle.
    #[must_use]
    pub fn cyclic(node: &impl Debug) -> Self {
        Self::CyclicGraph {
            node: format!("{node:?}"),
        }
    }

    pub(crate) fn requires_directed(operation: &'static str) -> Self {
        Self::invalid_operation(operation, "graph is undirected")
    }

    pub(crate) fn requires_undirected(operation: &'static str) -> Self {
        Self::invalid_operation(operation, "graph is directed")
    }

    pub(crate) fn requires_weighted(operation: &'static str) -> Self {
        Self::invalid_operation(operation, "graph is unweighted")
    }
}
