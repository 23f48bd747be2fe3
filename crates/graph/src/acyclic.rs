//! DAG detection, topological ordering and lowest common ancestors.

use crate::traversal::{DfsEvent, breadth_first, colors, depth_first};
use crate::{AdjacencyStore, Error, Graph, NodeId, Result};
use petgraph::stable_graph::NodeIndex;
use tracing::debug;

/// Reverse depth-first finishing order over the whole graph.
///
/// Roots are tried in node order and children in neighbour order. The first
/// back edge found aborts the search and is reported as `Err` with the node
/// it leads to, which lies on a cycle.
fn reverse_postorder<V: NodeId>(
    store: &AdjacencyStore<V>,
) -> std::result::Result<Vec<NodeIndex>, NodeIndex> {
    let mut colors = colors(store);
    let mut order = Vec::with_capacity(store.node_count());
    let mut cycle = None;

    for root in store.node_indices() {
        depth_first(
            root,
            &mut colors,
            |n| store.successors(n),
            |event| match event {
                DfsEvent::Finish(node) => order.push(node),
                DfsEvent::BackEdge { to } => {
                    cycle.get_or_insert(to);
                }
                DfsEvent::Discover { .. } => {}
            },
        );
        if let Some(node) = cycle {
            return Err(node);
        }
    }

    order.reverse();
    Ok(order)
}

impl<V: NodeId> Graph<V> {
    /// Check whether a directed graph has no cycle.
    ///
    /// Uses a three-colour depth-first search: an edge into a node that is
    /// still in progress closes a cycle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] if the graph is undirected.
    pub fn is_dag(&self) -> Result<bool> {
        self.require_directed("is_dag")?;
        Ok(reverse_postorder(self.store()).is_ok())
    }

    /// Order the nodes so that every edge `(u, v)` has `u` before `v`.
    ///
    /// The order is reverse depth-first finishing order, with search roots
    /// taken in node order and children in neighbour order, so it is stable
    /// for a given graph state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] if the graph is undirected and
    /// [`Error::CyclicGraph`] if it contains a cycle.
    pub fn topological_sort(&self) -> Result<Vec<V>> {
        self.require_directed("topological_sort")?;
        let store = self.store();
        let order = reverse_postorder(store).map_err(|n| Error::cyclic(store.node_at(n)))?;
        debug!("Sorted {} nodes topologically", order.len());
        Ok(order.into_iter().map(|n| store.node_at(n).clone()).collect())
    }

    /// The lowest common ancestor of two nodes of a DAG.
    ///
    /// Every node is its own ancestor. A common ancestor is lowest when none
    /// of its descendants is also a common ancestor; if several qualify, the
    /// first in node order is returned. Returns `None` when the nodes share
    /// no ancestor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] if the graph is undirected,
    /// [`Error::NodeNotFound`] if either node is absent and
    /// [`Error::CyclicGraph`] if the graph has a cycle.
    pub fn lowest_common_ancestor(&self, a: &V, b: &V) -> Result<Option<V>> {
        self.require_directed("lowest_common_ancestor")?;
        let store = self.store();
        let a = store.index_of(a)?;
        let b = store.index_of(b)?;
        reverse_postorder(store).map_err(|n| Error::cyclic(store.node_at(n)))?;

        let mut of_a = vec![false; store.node_bound()];
        breadth_first(a, &mut of_a, |n| store.predecessors(n));
        let mut of_b = vec![false; store.node_bound()];
        breadth_first(b, &mut of_b, |n| store.predecessors(n));
        let common = |n: NodeIndex| of_a[n.index()] && of_b[n.index()];

        // Any descendant of a common ancestor that is itself a common
        // ancestor is reachable through a child that is one too, so checking
        // direct children is enough.
        let lowest = store.node_indices().find(|&n| {
            common(n) && !store.successors(n).into_iter().any(|child| common(child))
        });
        Ok(lowest.map(|n| store.node_at(n).clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn dag() -> Graph<&'static str> {
        let mut graph = Graph::directed();
        graph.add_edge("shirt", "tie");
        graph.add_edge("tie", "jacket");
        graph.add_edge("trousers", "shoes");
        graph.add_edge("trousers", "belt");
        graph.add_edge("belt", "jacket");
        graph.add_edge("shirt", "belt");
        graph.add_edge("socks", "shoes");
        graph.add_node("watch");
        graph
    }

    fn assert_respects_edges(graph: &Graph<&'static str>, order: &[&'static str]) {
        let positions: HashMap<&str, usize> =
            order.iter().enumerate().map(|(i, n)| (*n, i)).collect();
        for (u, v) in graph.edges() {
            assert!(positions[u] < positions[v], "{u} should precede {v}");
        }
    }

    #[test]
    fn test_dag_detection() {
        let mut graph = dag();
        assert!(graph.is_dag().unwrap());

        graph.add_edge("jacket", "shirt");
        assert!(!graph.is_dag().unwrap());
    }

    #[test]
    fn test_topological_sort_respects_edges() {
        let graph = dag();
        let order = graph.topological_sort().unwrap();
        assert_eq!(order.len(), graph.node_count());
        assert_respects_edges(&graph, &order);
    }

    #[test]
    fn test_topological_sort_is_stable() {
        let graph = dag();
        assert_eq!(
            graph.topological_sort().unwrap(),
            graph.topological_sort().unwrap()
        );
    }

    #[test]
    fn test_topological_sort_tie_break() {
        // Independent nodes: reverse finishing order of roots in node order
        let graph = Graph::with_nodes(crate::GraphConfig::directed(), [1, 2, 3]);
        assert_eq!(graph.topological_sort().unwrap(), vec![3, 2, 1]);
    }

    #[test]
    fn test_cycle_detection() {
        let mut graph = Graph::directed();
        graph.add_edge("task1", "task2");
        graph.add_edge("task2", "task3");
        graph.add_edge("task3", "task1");

        assert!(!graph.is_dag().unwrap());
        assert!(matches!(
            graph.topological_sort(),
            Err(Error::CyclicGraph { .. })
        ));
    }

    #[test]
    fn test_self_loop_is_cycle() {
        let mut graph = Graph::directed();
        graph.add_edge("a", "a");
        assert!(!graph.is_dag().unwrap());
        assert_eq!(graph.topological_sort(), Err(Error::cyclic(&"a")));
    }

    #[test]
    fn test_empty_graph_is_dag() {
        let graph: Graph<u32> = Graph::directed();
        assert!(graph.is_dag().unwrap());
        assert!(graph.topological_sort().unwrap().is_empty());
    }

    #[test]
    fn test_undirected_rejected() {
        let mut graph = Graph::undirected();
        graph.add_edge(1, 2);
        assert!(matches!(
            graph.is_dag(),
            Err(Error::InvalidOperation { .. })
        ));
        assert!(matches!(
            graph.topological_sort(),
            Err(Error::InvalidOperation { .. })
        ));
    }

    #[test]
    fn test_lowest_common_ancestor() {
        let mut graph = Graph::directed();
        graph.add_edge("root", "left");
        graph.add_edge("root", "right");
        graph.add_edge("left", "a");
        graph.add_edge("left", "b");
        graph.add_edge("right", "c");

        assert_eq!(
            graph.lowest_common_ancestor(&"a", &"b").unwrap(),
            Some("left")
        );
        assert_eq!(
            graph.lowest_common_ancestor(&"a", &"c").unwrap(),
            Some("root")
        );
        assert_eq!(
            graph.lowest_common_ancestor(&"left", &"b").unwrap(),
            Some("left")
        );
    }

    #[test]
    fn test_lowest_common_ancestor_disjoint() {
        let mut graph = Graph::directed();
        graph.add_edge(1, 2);
        graph.add_edge(3, 4);
        assert_eq!(graph.lowest_common_ancestor(&2, &4).unwrap(), None);
    }

    #[test]
    fn test_lowest_common_ancestor_errors() {
        let mut graph = Graph::directed();
        graph.add_edge(1, 2);
        graph.add_edge(2, 1);
        assert!(matches!(
            graph.lowest_common_ancestor(&1, &2),
            Err(Error::CyclicGraph { .. })
        ));
        assert!(matches!(
            graph.lowest_common_ancestor(&1, &9),
            Err(Error::NodeNotFound { .. })
        ));
    }
}
