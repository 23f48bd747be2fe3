//! Connected and strongly connected components.
//!
//! Plain connectivity is defined for undirected graphs, strong connectivity
//! for directed ones. Weak connectivity ignores edge direction and accepts
//! either kind of graph.

use crate::traversal::{Color, DfsEvent, breadth_first, colors, depth_first};
use crate::{AdjacencyStore, Error, Graph, NodeId, Result};
use petgraph::stable_graph::NodeIndex;
use std::collections::HashSet;
use tracing::debug;

/// Partition the node set by repeated breadth-first search, seeding each
/// search from the first node (in node order) not yet covered.
fn components_by<V, N>(store: &AdjacencyStore<V>, mut next: N) -> Vec<Vec<NodeIndex>>
where
    V: NodeId,
    N: FnMut(NodeIndex) -> Vec<NodeIndex>,
{
    let mut visited = vec![false; store.node_bound()];
    let mut components = Vec::new();
    for root in store.node_indices() {
        if !visited[root.index()] {
            components.push(breadth_first(root, &mut visited, &mut next).nodes);
        }
    }
    components
}

/// Weakly connected components: edge direction is ignored.
fn weak_components<V: NodeId>(store: &AdjacencyStore<V>) -> Vec<Vec<NodeIndex>> {
    components_by(store, |n| {
        store
            .adjacent(n)
            .into_iter()
            .map(|(_, other)| other)
            .collect()
    })
}

/// Strongly connected components by Kosaraju's algorithm.
///
/// The first pass records depth-first finishing order over the graph; the
/// second pass runs depth-first searches over the transpose (incoming
/// edges) in decreasing finishing order. Each second-pass tree is one
/// component.
pub(crate) fn kosaraju<V: NodeId>(store: &AdjacencyStore<V>) -> Vec<Vec<NodeIndex>> {
    let mut finish_order = Vec::with_capacity(store.node_count());
    let mut forward = colors(store);
    for root in store.node_indices() {
        depth_first(
            root,
            &mut forward,
            |n| store.successors(n),
            |event| {
                if let DfsEvent::Finish(node) = event {
                    finish_order.push(node);
                }
            },
        );
    }

    let mut reverse = colors(store);
    let mut components = Vec::new();
    for &root in finish_order.iter().rev() {
        if reverse[root.index()] != Color::White {
            continue;
        }
        let mut component = Vec::new();
        depth_first(
            root,
            &mut reverse,
            |n| store.predecessors(n),
            |event| {
                if let DfsEvent::Discover { node, .. } = event {
                    component.push(node);
                }
            },
        );
        components.push(component);
    }

    debug!("Found {} strongly connected components", components.len());
    components
}

impl<V: NodeId> Graph<V> {
    /// Check whether every node of an undirected graph is reachable from
    /// every other.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] if the graph is directed or has no
    /// nodes.
    pub fn is_connected(&self) -> Result<bool> {
        self.require_undirected("is_connected")?;
        let root = self.first_node("is_connected")?;
        let store = self.store();
        let mut visited = vec![false; store.node_bound()];
        let reached = breadth_first(root, &mut visited, |n| store.successors(n));
        Ok(reached.nodes.len() == store.node_count())
    }

    /// The connected components of an undirected graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] if the graph is directed.
    pub fn connected_components(&self) -> Result<Vec<HashSet<V>>> {
        self.require_undirected("connected_components")?;
        let store = self.store();
        let components = components_by(store, |n| store.successors(n));
        debug!("Found {} connected components", components.len());
        Ok(self.node_sets(components))
    }

    /// The connected components of an undirected graph, each as an
    /// independent graph holding the induced edges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] if the graph is directed.
    pub fn connected_subgraphs(&self) -> Result<Vec<Self>> {
        self.require_undirected("connected_subgraphs")?;
        let store = self.store();
        let components = components_by(store, |n| store.successors(n));
        Ok(self.subgraphs(&components))
    }

    /// Number of connected components of an undirected graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] if the graph is directed.
    pub fn number_connected_components(&self) -> Result<usize> {
        self.require_undirected("number_connected_components")?;
        let store = self.store();
        Ok(components_by(store, |n| store.successors(n)).len())
    }

    /// The connected component containing `node`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] if the graph is directed and
    /// [`Error::NodeNotFound`] if the node is absent.
    pub fn node_connected_component(&self, node: &V) -> Result<HashSet<V>> {
        self.require_undirected("node_connected_component")?;
        let store = self.store();
        let root = store.index_of(node)?;
        let mut visited = vec![false; store.node_bound()];
        let reached = breadth_first(root, &mut visited, |n| store.successors(n));
        Ok(reached
            .nodes
            .into_iter()
            .map(|n| store.node_at(n).clone())
            .collect())
    }

    /// Check whether the graph is connected when edge direction is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] if the graph has no nodes.
    pub fn is_weakly_connected(&self) -> Result<bool> {
        self.first_node("is_weakly_connected")?;
        Ok(weak_components(self.store()).len() == 1)
    }

    /// Components of the graph when edge direction is ignored.
    #[must_use]
    pub fn weakly_connected_components(&self) -> Vec<HashSet<V>> {
        self.node_sets(weak_components(self.store()))
    }

    /// Check whether every node of a directed graph reaches every other
    /// along directed paths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] if the graph is undirected or has
    /// no nodes.
    pub fn is_strongly_connected(&self) -> Result<bool> {
        self.require_directed("is_strongly_connected")?;
        let root = self.first_node("is_strongly_connected")?;
        let store = self.store();
        let total = store.node_count();

        // Strongly connected iff one node reaches all and is reached by all.
        let mut visited = vec![false; store.node_bound()];
        let forward = breadth_first(root, &mut visited, |n| store.successors(n));
        if forward.nodes.len() != total {
            return Ok(false);
        }
        let mut visited = vec![false; store.node_bound()];
        let backward = breadth_first(root, &mut visited, |n| store.predecessors(n));
        Ok(backward.nodes.len() == total)
    }

    /// The strongly connected components of a directed graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] if the graph is undirected.
    pub fn strongly_connected_components(&self) -> Result<Vec<HashSet<V>>> {
        self.require_directed("strongly_connected_components")?;
        Ok(self.node_sets(kosaraju(self.store())))
    }

    /// The strongly connected components of a directed graph, each as an
    /// independent graph holding the induced edges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] if the graph is undirected.
    pub fn strongly_connected_subgraphs(&self) -> Result<Vec<Self>> {
        self.require_directed("strongly_connected_subgraphs")?;
        Ok(self.subgraphs(&kosaraju(self.store())))
    }

    pub(crate) fn require_directed(&self, operation: &'static str) -> Result<()> {
        if self.is_directed() {
            Ok(())
        } else {
            Err(Error::requires_directed(operation))
        }
    }

    pub(crate) fn require_undirected(&self, operation: &'static str) -> Result<()> {
        if self.is_directed() {
            Err(Error::requires_undirected(operation))
        } else {
            Ok(())
        }
    }

    fn first_node(&self, operation: &'static str) -> Result<NodeIndex> {
        self.store()
            .node_indices()
            .next()
            .ok_or_else(|| {
                Error::invalid_operation(operation, "connectivity is undefined for an empty graph")
            })
    }

    fn node_sets(&self, components: Vec<Vec<NodeIndex>>) -> Vec<HashSet<V>> {
        let store = self.store();
        components
            .into_iter()
            .map(|component| {
                component
                    .into_iter()
                    .map(|n| store.node_at(n).clone())
                    .collect()
            })
            .collect()
    }

    fn subgraphs(&self, components: &[Vec<NodeIndex>]) -> Vec<Self> {
        components
            .iter()
            .map(|component| Self::from_store(self.store().induced(component)))
            .collect()
    }
}
