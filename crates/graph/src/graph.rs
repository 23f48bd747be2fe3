//! The public graph type.
//!
//! [`Graph`] owns one [`AdjacencyStore`] and exposes the mutation and query
//! surface directly. The algorithm families add their own `impl Graph`
//! blocks in `traversal`, `connectivity`, `acyclic`, `spanning` and `paths`.

use crate::{AdjacencyStore, Error, GraphConfig, NodeId, Result};
use std::collections::HashSet;
use std::fmt;

/// A directed or undirected, weighted or unweighted graph.
///
/// Nodes are caller-chosen values; edges are `(source, target)` pairs. In an
/// undirected graph `(a, b)` and `(b, a)` name the same edge. Results of
/// subgraph, tree and spanning-tree operations are independent graphs that
/// share nothing with their source.
///
/// Not internally synchronised: wrap the whole graph in a lock to share it
/// mutably between threads.
#[derive(Debug, Clone)]
pub struct Graph<V: NodeId> {
    store: AdjacencyStore<V>,
}

impl<V: NodeId> Graph<V> {
    /// Create an empty graph.
    #[must_use]
    pub fn new(config: GraphConfig) -> Self {
        Self {
            store: AdjacencyStore::new(config),
        }
    }

    /// Create an empty undirected, unweighted graph.
    #[must_use]
    pub fn undirected() -> Self {
        Self::new(GraphConfig::undirected())
    }

    /// Create an empty directed, unweighted graph.
    #[must_use]
    pub fn directed() -> Self {
        Self::new(GraphConfig::directed())
    }

    /// Create a graph pre-seeded with nodes.
    #[must_use]
    pub fn with_nodes(config: GraphConfig, nodes: impl IntoIterator<Item = V>) -> Self {
        let mut graph = Self::new(config);
        graph.add_nodes(nodes);
        graph
    }

    pub(crate) const fn from_store(store: AdjacencyStore<V>) -> Self {
        Self { store }
    }

    /// The underlying adjacency store.
    pub(crate) const fn store(&self) -> &AdjacencyStore<V> {
        &self.store
    }

    /// The configuration this graph was created with.
    #[must_use]
    pub const fn config(&self) -> GraphConfig {
        self.store.config()
    }

    /// Whether `(a, b)` and `(b, a)` are distinct edges.
    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.store.config().directed
    }

    /// Whether edges carry weights.
    #[must_use]
    pub const fn is_weighted(&self) -> bool {
        self.store.config().weighted
    }

    /// Remove every node and edge.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    // =========================================================================
    // Nodes
    // =========================================================================

    /// Add a node. Adding an existing node is a no-op.
    pub fn add_node(&mut self, node: V) {
        self.store.add_node(node);
    }

    /// Add several nodes.
    pub fn add_nodes(&mut self, nodes: impl IntoIterator<Item = V>) {
        self.store.add_nodes(nodes);
    }

    /// Remove a node and every edge incident to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if the node is absent.
    pub fn remove_node(&mut self, node: &V) -> Result<()> {
        self.store.remove_node(node)
    }

    /// Check whether a node exists.
    #[must_use]
    pub fn has_node(&self, node: &V) -> bool {
        self.store.contains_node(node)
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.store.node_count()
    }

    /// The node set, in a stable order.
    #[must_use]
    pub fn nodes(&self) -> Vec<V> {
        self.store.nodes().cloned().collect()
    }

    /// Total degree of a node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if the node is absent.
    pub fn degree(&self, node: &V) -> Result<usize> {
        self.store.degree(node)
    }

    /// In-degree of a node in a directed graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] on an undirected graph and
    /// [`Error::NodeNotFound`] if the node is absent.
    pub fn in_degree(&self, node: &V) -> Result<usize> {
        self.store.in_degree(node)
    }

    /// Out-degree of a node in a directed graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] on an undirected graph and
    /// [`Error::NodeNotFound`] if the node is absent.
    pub fn out_degree(&self, node: &V) -> Result<usize> {
        self.store.out_degree(node)
    }

    /// Adjacent nodes, in the order traversals visit them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if the node is absent.
    pub fn neighbors(&self, node: &V) -> Result<Vec<V>> {
        self.store.neighbors(node)
    }

    /// Every edge touching a node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if the node is absent.
    pub fn incident_edges(&self, node: &V) -> Result<Vec<(V, V)>> {
        self.store.incident_edges(node)
    }

    /// Edges whose target is the node, in a directed graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] on an undirected graph and
    /// [`Error::NodeNotFound`] if the node is absent.
    pub fn in_edges(&self, node: &V) -> Result<Vec<(V, V)>> {
        self.store.in_edges(node)
    }

    /// Edges whose source is the node, in a directed graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] on an undirected graph and
    /// [`Error::NodeNotFound`] if the node is absent.
    pub fn out_edges(&self, node: &V) -> Result<Vec<(V, V)>> {
        self.store.out_edges(node)
    }

    // =========================================================================
    // Edges
    // =========================================================================

    /// Add an edge, adding missing endpoints. Adding an existing edge is a
    /// no-op.
    pub fn add_edge(&mut self, from: V, to: V) {
        self.store.add_edge(from, to);
    }

    /// Add an edge with a weight, or update the weight of an existing edge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] on an unweighted graph.
    pub fn add_weighted_edge(&mut self, from: V, to: V, weight: f64) -> Result<()> {
        if !self.is_weighted() {
            return Err(Error::requires_weighted("add_weighted_edge"));
        }
        self.store.add_edge(from.clone(), to.clone());
        self.store.set_weight(&from, &to, weight)
    }

    /// Remove an edge and its weight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EdgeNotFound`] if the edge is absent.
    pub fn remove_edge(&mut self, from: &V, to: &V) -> Result<()> {
        self.store.remove_edge(from, to)
    }

    /// Check whether an edge exists.
    #[must_use]
    pub fn has_edge(&self, from: &V, to: &V) -> bool {
        self.store.contains_edge(from, to)
    }

    /// The edge between two nodes as stored, if any.
    ///
    /// Undirected graphs may return the pair in the opposite orientation.
    #[must_use]
    pub fn edge(&self, from: &V, to: &V) -> Option<(V, V)> {
        self.store
            .edge(from, to)
            .map(|(a, b)| (a.clone(), b.clone()))
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.store.edge_count()
    }

    /// The edge set, in a stable order.
    #[must_use]
    pub fn edges(&self) -> Vec<(V, V)> {
        self.store
            .edges()
            .map(|(a, b)| (a.clone(), b.clone()))
            .collect()
    }

    /// Weight of an edge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] on an unweighted graph and
    /// [`Error::EdgeNotFound`] if the edge is absent.
    pub fn weight(&self, from: &V, to: &V) -> Result<f64> {
        self.store.weight(from, to)
    }

    /// Set the weight of an existing edge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] on an unweighted graph and
    /// [`Error::EdgeNotFound`] if the edge is absent.
    pub fn set_weight(&mut self, from: &V, to: &V, weight: f64) -> Result<()> {
        self.store.set_weight(from, to, weight)
    }

    /// Replace the source of an edge, keeping its target and weight.
    ///
    /// The old edge is removed and a new one added; edges are values, not
    /// identities.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EdgeNotFound`] if the edge is absent.
    pub fn set_edge_source(&mut self, edge: &(V, V), source: V) -> Result<()> {
        self.reroute_edge(edge, source, edge.1.clone())
    }

    /// Replace the target of an edge, keeping its source and weight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EdgeNotFound`] if the edge is absent.
    pub fn set_edge_target(&mut self, edge: &(V, V), target: V) -> Result<()> {
        self.reroute_edge(edge, edge.0.clone(), target)
    }

    fn reroute_edge(&mut self, (from, to): &(V, V), new_from: V, new_to: V) -> Result<()> {
        let weight = if self.is_weighted() {
            Some(self.store.weight(from, to)?)
        } else if self.store.contains_edge(from, to) {
            None
        } else {
            return Err(Error::edge_not_found(from, to));
        };

        self.store.remove_edge(from, to)?;
        match weight {
            Some(weight) => self.add_weighted_edge(new_from, new_to, weight),
            None => {
                self.store.add_edge(new_from, new_to);
                Ok(())
            }
        }
    }
}

impl<V: NodeId> Default for Graph<V> {
    fn default() -> Self {
        Self::undirected()
    }
}

impl<V: NodeId> PartialEq for Graph<V> {
    fn eq(&self, other: &Self) -> bool {
        if self.config() != other.config()
            || self.node_count() != other.node_count()
            || self.edge_count() != other.edge_count()
        {
            return false;
        }

        let nodes: HashSet<&V> = self.store.nodes().collect();
        if !other.store.nodes().all(|n| nodes.contains(n)) {
            return false;
        }

        // Edge counts match and there are no parallel edges, so containment
        // in one direction is enough.
        let weighted = self.is_weighted();
        other.store.edges().all(|(a, b)| {
            self.store.contains_edge(a, b)
                && (!weighted
                    || self.store.weight(a, b).ok().map(f64::to_bits)
                        == other.store.weight(a, b).ok().map(f64::to_bits))
        })
    }
}

impl<V: NodeId> fmt::Display for Graph<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{:?}, {:?}}}", self.nodes(), self.edges())?;
        if self.is_directed() {
            write!(f, ", directed")?;
        }
        if self.is_weighted() {
            write!(f, ", weighted")?;
        }
        Ok(())
    }
}
