//! Adjacency storage backed by petgraph.
//!
//! [`AdjacencyStore`] is the single owner of a graph's topology: the node
//! set, the edge set and the per-edge weights. Every algorithm in this crate
//! reads it through the index-level helpers at the bottom of this file.

use crate::{Error, GraphConfig, NodeId, Result};
use petgraph::Direction::{self, Incoming, Outgoing};
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, NodeIndexable};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Weight given to a new edge of a weighted graph when none is supplied.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Canonical storage of nodes, edges and weights.
///
/// Edges live in a [`StableDiGraph`] so removing a node never invalidates
/// the indices of the remaining ones. Undirected graphs store each edge once,
/// in the orientation it was first inserted, and every query consults both
/// orientations. The edge payload is `None` for unweighted graphs, which keeps
/// the weight map a subset of the edge set by construction.
#[derive(Debug, Clone)]
pub struct AdjacencyStore<V: NodeId> {
    /// Topology plus edge weights.
    graph: StableDiGraph<V, Option<f64>>,
    /// Map from node values to their indices.
    index: HashMap<V, NodeIndex>,
    config: GraphConfig,
}

impl<V: NodeId> AdjacencyStore<V> {
    /// Create an empty store.
    #[must_use]
    pub fn new(config: GraphConfig) -> Self {
        Self {
            graph: StableDiGraph::default(),
            index: HashMap::new(),
            config,
        }
    }

    /// The configuration this store was created with.
    #[must_use]
    pub const fn config(&self) -> GraphConfig {
        self.config
    }

    /// Add a node, returning its index.
    ///
    /// If the node already exists, returns the existing index.
    pub fn add_node(&mut self, node: V) -> NodeIndex {
        if let Some(&idx) = self.index.get(&node) {
            return idx;
        }

        let idx = self.graph.add_node(node.clone());
        debug!("Added node {:?}", node);
        self.index.insert(node, idx);
        idx
    }

    /// Add every node from an iterator.
    pub fn add_nodes(&mut self, nodes: impl IntoIterator<Item = V>) {
        for node in nodes {
            self.add_node(node);
        }
    }

    /// Remove a node together with its incident edges and their weights.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if the node is absent.
    pub fn remove_node(&mut self, node: &V) -> Result<()> {
        let idx = self.index_of(node)?;
        self.graph.remove_node(idx);
        self.index.remove(node);
        debug!("Removed node {:?}", node);
        Ok(())
    }

    /// Check whether a node exists.
    #[must_use]
    pub fn contains_node(&self, node: &V) -> bool {
        self.index.contains_key(node)
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Iterate over the node set in index order.
    pub fn nodes(&self) -> impl Iterator<Item = &V> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Add an edge, inserting missing endpoints first.
    ///
    /// Adding an edge that already exists (in either orientation, when
    /// undirected) returns the existing edge and leaves its weight alone.
    pub fn add_edge(&mut self, from: V, to: V) -> EdgeIndex {
        let a = self.add_node(from);
        let b = self.add_node(to);
        if let Some(edge) = self.find_edge_index(a, b) {
            return edge;
        }

        let payload = self.config.weighted.then_some(DEFAULT_WEIGHT);
        let edge = self.graph.add_edge(a, b, payload);
        debug!("Added edge ({:?}, {:?})", self.graph[a], self.graph[b]);
        edge
    }

    /// Remove an edge and its weight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EdgeNotFound`] if the edge is absent.
    pub fn remove_edge(&mut self, from: &V, to: &V) -> Result<()> {
        let edge = self.edge_index(from, to)?;
        self.graph.remove_edge(edge);
        debug!("Removed edge ({:?}, {:?})", from, to);
        Ok(())
    }

    /// Check whether an edge exists.
    #[must_use]
    pub fn contains_edge(&self, from: &V, to: &V) -> bool {
        self.edge_index(from, to).is_ok()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterate over the edge set in stored orientation and index order.
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V)> {
        self.graph.edge_indices().filter_map(|edge| {
            self.graph
                .edge_endpoints(edge)
                .map(|(a, b)| (&self.graph[a], &self.graph[b]))
        })
    }

    /// The stored pair for the edge between two nodes, if any.
    ///
    /// For undirected graphs this may be `(to, from)`.
    #[must_use]
    pub fn edge(&self, from: &V, to: &V) -> Option<(&V, &V)> {
        let edge = self.edge_index(from, to).ok()?;
        self.graph
            .edge_endpoints(edge)
            .map(|(a, b)| (&self.graph[a], &self.graph[b]))
    }

    /// Weight of an edge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] on an unweighted graph and
    /// [`Error::EdgeNotFound`] if the edge is absent.
    pub fn weight(&self, from: &V, to: &V) -> Result<f64> {
        if !self.config.weighted {
            return Err(Error::requires_weighted("weight"));
        }
        let edge = self.edge_index(from, to)?;
        Ok(self.edge_weight(edge))
    }

    /// Set the weight of an existing edge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] on an unweighted graph and
    /// [`Error::EdgeNotFound`] if the edge is absent.
    pub fn set_weight(&mut self, from: &V, to: &V, weight: f64) -> Result<()> {
        if !self.config.weighted {
            return Err(Error::requires_weighted("set_weight"));
        }
        let edge = self.edge_index(from, to)?;
        if let Some(payload) = self.graph.edge_weight_mut(edge) {
            *payload = Some(weight);
        }
        Ok(())
    }

    /// Total number of edge endpoints at a node. Self-loops count twice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if the node is absent.
    pub fn degree(&self, node: &V) -> Result<usize> {
        let idx = self.index_of(node)?;
        Ok(self.graph.edges_directed(idx, Outgoing).count()
            + self.graph.edges_directed(idx, Incoming).count())
    }

    /// Number of edges whose target is the node. Directed graphs only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] on an undirected graph and
    /// [`Error::NodeNotFound`] if the node is absent.
    pub fn in_degree(&self, node: &V) -> Result<usize> {
        self.directed_degree("in_degree", node, Incoming)
    }

    /// Number of edges whose source is the node. Directed graphs only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] on an undirected graph and
    /// [`Error::NodeNotFound`] if the node is absent.
    pub fn out_degree(&self, node: &V) -> Result<usize> {
        self.directed_degree("out_degree", node, Outgoing)
    }

    fn directed_degree(&self, operation: &'static str, node: &V, dir: Direction) -> Result<usize> {
        if !self.config.directed {
            return Err(Error::requires_directed(operation));
        }
        let idx = self.index_of(node)?;
        Ok(self.graph.edges_directed(idx, dir).count())
    }

    /// Nodes reachable over one edge: successors when directed, every
    /// adjacent node when undirected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if the node is absent.
    pub fn neighbors(&self, node: &V) -> Result<Vec<V>> {
        let idx = self.index_of(node)?;
        Ok(self
            .successors(idx)
            .into_iter()
            .map(|n| self.graph[n].clone())
            .collect())
    }

    /// Every edge touching the node, in stored orientation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if the node is absent.
    pub fn incident_edges(&self, node: &V) -> Result<Vec<(V, V)>> {
        let idx = self.index_of(node)?;
        Ok(self.edge_pairs(&self.ordered_edges(idx, &[Outgoing, Incoming])))
    }

    /// Edges whose target is the node. Directed graphs only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] on an undirected graph and
    /// [`Error::NodeNotFound`] if the node is absent.
    pub fn in_edges(&self, node: &V) -> Result<Vec<(V, V)>> {
        if !self.config.directed {
            return Err(Error::requires_directed("in_edges"));
        }
        let idx = self.index_of(node)?;
        Ok(self.edge_pairs(&self.ordered_edges(idx, &[Incoming])))
    }

    /// Edges whose source is the node. Directed graphs only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] on an undirected graph and
    /// [`Error::NodeNotFound`] if the node is absent.
    pub fn out_edges(&self, node: &V) -> Result<Vec<(V, V)>> {
        if !self.config.directed {
            return Err(Error::requires_directed("out_edges"));
        }
        let idx = self.index_of(node)?;
        Ok(self.edge_pairs(&self.ordered_edges(idx, &[Outgoing])))
    }

    /// Remove every node and edge. The configuration is kept.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.index.clear();
        debug!("Cleared graph");
    }

    // ---------------------------------------------------------------------
    // Index-level access for the algorithm modules
    // ---------------------------------------------------------------------

    /// Index of a node.
    pub(crate) fn index_of(&self, node: &V) -> Result<NodeIndex> {
        self.index
            .get(node)
            .copied()
            .ok_or_else(|| Error::node_not_found(node))
    }

    /// Node value at an index produced by this store.
    pub(crate) fn node_at(&self, idx: NodeIndex) -> &V {
        &self.graph[idx]
    }

    pub(crate) fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Upper bound on node index values, for dense per-node tables.
    pub(crate) fn node_bound(&self) -> usize {
        self.graph.node_bound()
    }

    /// Neighbours in traversal direction: outgoing when directed, both
    /// orientations when undirected. Ordered by edge index.
    pub(crate) fn successors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let dirs: &[Direction] = if self.config.directed {
            &[Outgoing]
        } else {
            &[Outgoing, Incoming]
        };
        self.ordered_edges(idx, dirs)
            .into_iter()
            .map(|(_, other)| other)
            .collect()
    }

    /// Neighbours in the transpose graph.
    pub(crate) fn predecessors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        if !self.config.directed {
            return self.successors(idx);
        }
        self.ordered_edges(idx, &[Incoming])
            .into_iter()
            .map(|(_, other)| other)
            .collect()
    }

    /// Neighbours over the underlying undirected structure, with the edge
    /// used to reach each one.
    pub(crate) fn adjacent(&self, idx: NodeIndex) -> Vec<(EdgeIndex, NodeIndex)> {
        self.ordered_edges(idx, &[Outgoing, Incoming])
    }

    /// Weight of an edge by index; edges of unweighted graphs cost
    /// [`DEFAULT_WEIGHT`].
    pub(crate) fn edge_weight(&self, edge: EdgeIndex) -> f64 {
        self.graph
            .edge_weight(edge)
            .copied()
            .flatten()
            .unwrap_or(DEFAULT_WEIGHT)
    }

    /// Copy an edge, with its weight, from another store built over the same
    /// node type. Missing endpoints are added.
    pub(crate) fn copy_edge_from(&mut self, other: &Self, edge: EdgeIndex) {
        let Some((a, b)) = other.graph.edge_endpoints(edge) else {
            return;
        };
        let payload = other.graph.edge_weight(edge).copied().flatten();
        let new_edge = self.add_edge(other.graph[a].clone(), other.graph[b].clone());
        if self.config.weighted
            && let Some(weight) = payload
            && let Some(slot) = self.graph.edge_weight_mut(new_edge)
        {
            *slot = Some(weight);
        }
    }

    /// Build the subgraph induced by `members`, keeping this store's
    /// configuration and weights.
    ///
    /// Only the edges incident to members are inspected, so the cost is
    /// proportional to the members' total degree.
    pub(crate) fn induced(&self, members: &[NodeIndex]) -> Self {
        let member_set: HashSet<NodeIndex> = members.iter().copied().collect();
        let mut sub = Self::new(self.config);
        for &idx in members {
            sub.add_node(self.graph[idx].clone());
        }
        for &idx in members {
            // Stored orientation visits every induced edge exactly once.
            for (edge, other) in self.ordered_edges(idx, &[Outgoing]) {
                if member_set.contains(&other) {
                    sub.copy_edge_from(self, edge);
                }
            }
        }
        sub
    }

    /// Edge between two indices, honouring directedness.
    pub(crate) fn find_edge_index(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        if self.config.directed {
            self.graph.find_edge(a, b)
        } else {
            self.graph.find_edge_undirected(a, b).map(|(edge, _)| edge)
        }
    }

    fn edge_index(&self, from: &V, to: &V) -> Result<EdgeIndex> {
        let missing = || Error::edge_not_found(from, to);
        let (Some(&a), Some(&b)) = (self.index.get(from), self.index.get(to)) else {
            return Err(missing());
        };
        self.find_edge_index(a, b).ok_or_else(missing)
    }

    /// Edges at `idx` in the given directions, paired with the opposite
    /// endpoint and sorted by edge index. A self-loop is reported once.
    fn ordered_edges(&self, idx: NodeIndex, dirs: &[Direction]) -> Vec<(EdgeIndex, NodeIndex)> {
        let mut edges: Vec<(EdgeIndex, NodeIndex)> = dirs
            .iter()
            .flat_map(|&dir| {
                self.graph.edges_directed(idx, dir).map(move |e| {
                    let other = if dir == Outgoing { e.target() } else { e.source() };
                    (e.id(), other)
                })
            })
            .collect();
        edges.sort_unstable_by_key(|&(edge, _)| edge);
        edges.dedup_by_key(|&mut (edge, _)| edge);
        edges
    }

    fn edge_pairs(&self, edges: &[(EdgeIndex, NodeIndex)]) -> Vec<(V, V)> {
        edges
            .iter()
            .filter_map(|&(edge, _)| self.graph.edge_endpoints(edge))
            .map(|(a, b)| (self.graph[a].clone(), self.graph[b].clone()))
            .collect()
    }
}
