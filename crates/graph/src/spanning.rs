//! Minimum spanning trees by Prim's algorithm.

use crate::{AdjacencyStore, Error, Graph, NodeId, Result};
use petgraph::stable_graph::{EdgeIndex, NodeIndex};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::{debug, trace};

/// An edge crossing from the tree to a node outside it.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    weight: f64,
    /// Discovery sequence number; breaks ties between equal weights.
    seq: usize,
    edge: EdgeIndex,
    to: NodeIndex,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    // Reversed so the max-heap pops the lightest, earliest candidate.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Grows one tree from `root` over the underlying undirected structure,
/// returning the tree's nodes in joining order and its edges.
fn prim<V: NodeId>(
    store: &AdjacencyStore<V>,
    root: NodeIndex,
    in_tree: &mut [bool],
) -> (Vec<NodeIndex>, Vec<EdgeIndex>) {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut frontier = BinaryHeap::new();
    let mut seq = 0;

    let mut join = |node: NodeIndex, frontier: &mut BinaryHeap<Candidate>, in_tree: &mut [bool]| {
        in_tree[node.index()] = true;
        nodes.push(node);
        for (edge, to) in store.adjacent(node) {
            if !in_tree[to.index()] {
                frontier.push(Candidate {
                    weight: store.edge_weight(edge),
                    seq,
                    edge,
                    to,
                });
                seq += 1;
            }
        }
    };

    join(root, &mut frontier, &mut *in_tree);
    while let Some(candidate) = frontier.pop() {
        if in_tree[candidate.to.index()] {
            continue;
        }
        trace!(weight = candidate.weight, "Selected spanning tree edge");
        edges.push(candidate.edge);
        join(candidate.to, &mut frontier, &mut *in_tree);
    }

    (nodes, edges)
}

impl<V: NodeId> Graph<V> {
    /// Minimum spanning tree by Prim's algorithm.
    ///
    /// Starts from the first node in node order and repeatedly adds the
    /// lightest edge leaving the tree; equal weights go to the edge
    /// discovered first. Only well defined for connected, undirected graphs:
    /// on a disconnected graph the result spans the start node's component
    /// only, and directed edges may be crossed either way (keeping their
    /// orientation in the result). The result has this graph's configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] if the graph is unweighted.
    pub fn minimum_spanning_tree(&self) -> Result<Self> {
        self.require_weighted("minimum_spanning_tree")?;
        let store = self.store();
        let mut tree = AdjacencyStore::new(self.config());
        if let Some(root) = store.node_indices().next() {
            let mut in_tree = vec![false; store.node_bound()];
            let (nodes, edges) = prim(store, root, &mut in_tree);
            extend_tree(&mut tree, store, &nodes, &edges);
        }
        debug!(
            "Built minimum spanning tree with {} nodes and {} edges",
            tree.node_count(),
            tree.edge_count()
        );
        Ok(Self::from_store(tree))
    }

    /// Minimum spanning forest: one Prim tree per component, covering every
    /// node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] if the graph is unweighted.
    pub fn minimum_spanning_forest(&self) -> Result<Self> {
        self.require_weighted("minimum_spanning_forest")?;
        let store = self.store();
        let mut forest = AdjacencyStore::new(self.config());
        let mut in_tree = vec![false; store.node_bound()];
        let mut trees = 0;
        for root in store.node_indices() {
            if !in_tree[root.index()] {
                let (nodes, edges) = prim(store, root, &mut in_tree);
                extend_tree(&mut forest, store, &nodes, &edges);
                trees += 1;
            }
        }
        debug!("Built minimum spanning forest of {} trees", trees);
        Ok(Self::from_store(forest))
    }

    /// Sum of all edge weights.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] if the graph is unweighted.
    pub fn total_weight(&self) -> Result<f64> {
        self.require_weighted("total_weight")?;
        self.store()
            .edges()
            .map(|(a, b)| self.store().weight(a, b))
            .sum()
    }

    fn require_weighted(&self, operation: &'static str) -> Result<()> {
        if self.is_weighted() {
            Ok(())
        } else {
            Err(Error::requires_weighted(operation))
        }
    }
}

fn extend_tree<V: NodeId>(
    tree: &mut AdjacencyStore<V>,
    source: &AdjacencyStore<V>,
    nodes: &[NodeIndex],
    edges: &[EdgeIndex],
) {
    for &node in nodes {
        tree.add_node(source.node_at(node).clone());
    }
    for &edge in edges {
        tree.copy_edge_from(source, edge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphConfig;

    /// The weighted sample graph: a-b 2, a-c 3, b-c 1, b-e 4, c-d 2, d-e 5,
    /// a-e 2, b-d 3.
    fn weighted(config: GraphConfig) -> Graph<&'static str> {
        let mut graph = Graph::new(config.weighted(true));
        for (u, v, w) in [
            ("a", "b", 2.0),
            ("a", "c", 3.0),
            ("b", "c", 1.0),
            ("b", "e", 4.0),
            ("c", "d", 2.0),
            ("d", "e", 5.0),
            ("a", "e", 2.0),
            ("b", "d", 3.0),
        ] {
            graph.add_weighted_edge(u, v, w).unwrap();
        }
        graph
    }

    #[test]
    fn test_minimum_spanning_tree() {
        let graph = weighted(GraphConfig::undirected());
        let mst = graph.minimum_spanning_tree().unwrap();

        assert_eq!(mst.node_count(), 5);
        assert_eq!(mst.edge_count(), 4);
        assert_eq!(mst.total_weight().unwrap(), 7.0);
        assert!(mst.has_edge(&"b", &"c"));
        assert!(mst.has_edge(&"c", &"d"));
        assert!(mst.is_connected().unwrap());
        assert!(mst.is_weighted());
    }

    #[test]
    fn test_mst_keeps_weights() {
        let graph = weighted(GraphConfig::undirected());
        let mst = graph.minimum_spanning_tree().unwrap();
        for (u, v) in mst.edges() {
            assert_eq!(mst.weight(&u, &v).unwrap(), graph.weight(&u, &v).unwrap());
        }
    }

    #[test]
    fn test_equal_weights_prefer_first_discovered() {
        let mut graph = Graph::new(GraphConfig::undirected().weighted(true));
        graph.add_weighted_edge(1, 2, 1.0).unwrap();
        graph.add_weighted_edge(1, 3, 1.0).unwrap();
        graph.add_weighted_edge(2, 3, 1.0).unwrap();

        let mst = graph.minimum_spanning_tree().unwrap();
        assert_eq!(mst.edges(), vec![(1, 2), (1, 3)]);
    }

    #[test]
    fn test_mst_of_disconnected_graph_spans_start_component() {
        let mut graph = weighted(GraphConfig::undirected());
        graph.add_weighted_edge("x", "y", 1.0).unwrap();

        let mst = graph.minimum_spanning_tree().unwrap();
        assert_eq!(mst.node_count(), 5);
        assert!(!mst.has_node(&"x"));

        let forest = graph.minimum_spanning_forest().unwrap();
        assert_eq!(forest.node_count(), 7);
        assert_eq!(forest.edge_count(), 5);
        assert_eq!(forest.total_weight().unwrap(), 8.0);
    }

    #[test]
    fn test_directed_mst_keeps_orientation() {
        let graph = weighted(GraphConfig::directed());
        let mst = graph.minimum_spanning_tree().unwrap();
        assert!(mst.is_directed());
        assert_eq!(mst.edge_count(), 4);
        assert_eq!(mst.total_weight().unwrap(), 7.0);
        assert!(mst.has_edge(&"b", &"c"));
        assert!(!mst.has_edge(&"c", &"b"));
    }

    #[test]
    fn test_mst_requires_weights() {
        let mut graph = Graph::undirected();
        graph.add_edge(1, 2);
        assert!(matches!(
            graph.minimum_spanning_tree(),
            Err(Error::InvalidOperation { .. })
        ));
        assert!(graph.minimum_spanning_forest().is_err());
    }

    #[test]
    fn test_mst_of_empty_graph() {
        let graph: Graph<u8> = Graph::new(GraphConfig::undirected().weighted(true));
        let mst = graph.minimum_spanning_tree().unwrap();
        assert_eq!(mst.node_count(), 0);
    }

    #[test]
    fn test_candidate_ordering() {
        let light = Candidate {
            weight: 1.0,
            seq: 5,
            edge: EdgeIndex::new(0),
            to: NodeIndex::new(0),
        };
        let heavy = Candidate {
            weight: 2.0,
            seq: 0,
            ..light
        };
        let later = Candidate { seq: 6, ..light };

        let mut heap = BinaryHeap::from([heavy, later, light]);
        assert_eq!(heap.pop().map(|c| c.seq), Some(5));
        assert_eq!(heap.pop().map(|c| c.seq), Some(6));
        assert_eq!(heap.pop().map(|c| c.seq), Some(0));
    }
}
