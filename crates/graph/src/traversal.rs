//! Breadth-first and depth-first traversal.
//!
//! Directed graphs are walked along outgoing edges, undirected graphs along
//! every incident edge. Neighbours are visited in the store's neighbour
//! order, so walks are deterministic for a given graph state.
//!
//! The depth-first primitive here reports discover, back-edge and finish
//! events; connectivity and acyclicity analysis build on it.

use crate::{AdjacencyStore, Graph, GraphConfig, NodeId, Result};
use petgraph::stable_graph::NodeIndex;
use std::collections::VecDeque;

/// A list of `(parent, child)` discovery edges.
pub type EdgeList<V> = Vec<(V, V)>;

/// The result of a traversal: nodes in discovery order (root first) and the
/// edge through which each non-root node was discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk<V> {
    /// Nodes in discovery order, starting with the root.
    pub nodes: Vec<V>,
    /// Discovery edges, one per non-root node, in discovery order.
    pub edges: EdgeList<V>,
}

/// Node state during a depth-first search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    /// Not yet discovered.
    White,
    /// Discovered, descendants still being explored.
    Gray,
    /// Finished.
    Black,
}

/// Events reported by [`depth_first`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DfsEvent {
    /// A node was reached for the first time.
    Discover {
        parent: Option<NodeIndex>,
        node: NodeIndex,
    },
    /// An edge led back to a node that is still in progress.
    BackEdge { to: NodeIndex },
    /// All of a node's descendants have been explored.
    Finish(NodeIndex),
}

/// A walk expressed in store indices.
#[derive(Debug, Default)]
pub(crate) struct IndexWalk {
    pub nodes: Vec<NodeIndex>,
    pub edges: Vec<(NodeIndex, NodeIndex)>,
}

/// Fresh colour table for a store.
pub(crate) fn colors<V: NodeId>(store: &AdjacencyStore<V>) -> Vec<Color> {
    vec![Color::White; store.node_bound()]
}

/// Depth-first search from `root` using an explicit stack.
///
/// `next` yields the children of a node. Nodes already coloured in `colors`
/// are not rediscovered, so repeated calls sharing one table explore a
/// forest. Does nothing if `root` is not white.
pub(crate) fn depth_first<N, F>(root: NodeIndex, colors: &mut [Color], mut next: N, mut visit: F)
where
    N: FnMut(NodeIndex) -> Vec<NodeIndex>,
    F: FnMut(DfsEvent),
{
    if colors[root.index()] != Color::White {
        return;
    }

    colors[root.index()] = Color::Gray;
    visit(DfsEvent::Discover {
        parent: None,
        node: root,
    });
    let mut stack = vec![(root, next(root).into_iter())];

    while let Some((node, children)) = stack.last_mut() {
        let node = *node;
        match children.next() {
            Some(child) => match colors[child.index()] {
                Color::White => {
                    colors[child.index()] = Color::Gray;
                    visit(DfsEvent::Discover {
                        parent: Some(node),
                        node: child,
                    });
                    let grandchildren = next(child).into_iter();
                    stack.push((child, grandchildren));
                }
                Color::Gray => visit(DfsEvent::BackEdge { to: child }),
                Color::Black => {}
            },
            None => {
                colors[node.index()] = Color::Black;
                visit(DfsEvent::Finish(node));
                stack.pop();
            }
        }
    }
}

/// Breadth-first search from `root` with a FIFO frontier.
///
/// Each node is enqueued at most once; `visited` may be shared between calls.
pub(crate) fn breadth_first<N>(root: NodeIndex, visited: &mut [bool], mut next: N) -> IndexWalk
where
    N: FnMut(NodeIndex) -> Vec<NodeIndex>,
{
    let mut walk = IndexWalk::default();
    if visited[root.index()] {
        return walk;
    }

    visited[root.index()] = true;
    walk.nodes.push(root);
    let mut frontier = VecDeque::from([root]);

    while let Some(node) = frontier.pop_front() {
        for child in next(node) {
            if !visited[child.index()] {
                visited[child.index()] = true;
                walk.nodes.push(child);
                walk.edges.push((node, child));
                frontier.push_back(child);
            }
        }
    }

    walk
}

/// Depth-first discovery walk from `root`.
pub(crate) fn depth_first_walk<V: NodeId>(store: &AdjacencyStore<V>, root: NodeIndex) -> IndexWalk {
    let mut walk = IndexWalk::default();
    let mut colors = colors(store);
    depth_first(
        root,
        &mut colors,
        |n| store.successors(n),
        |event| {
            if let DfsEvent::Discover { parent, node } = event {
                walk.nodes.push(node);
                if let Some(parent) = parent {
                    walk.edges.push((parent, node));
                }
            }
        },
    );
    walk
}

/// Breadth-first discovery walk from `root`.
pub(crate) fn breadth_first_walk<V: NodeId>(
    store: &AdjacencyStore<V>,
    root: NodeIndex,
) -> IndexWalk {
    let mut visited = vec![false; store.node_bound()];
    breadth_first(root, &mut visited, |n| store.successors(n))
}

impl<V: NodeId> Graph<V> {
    /// Breadth-first walk from `root`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NodeNotFound`] if `root` is absent.
    pub fn bfs(&self, root: &V) -> Result<Walk<V>> {
        let store = self.store();
        let walk = breadth_first_walk(store, store.index_of(root)?);
        Ok(self.resolve_walk(&walk))
    }

    /// Depth-first walk from `root`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NodeNotFound`] if `root` is absent.
    pub fn dfs(&self, root: &V) -> Result<Walk<V>> {
        let store = self.store();
        let walk = depth_first_walk(store, store.index_of(root)?);
        Ok(self.resolve_walk(&walk))
    }

    /// Discovery edges of a breadth-first walk from `root`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NodeNotFound`] if `root` is absent.
    pub fn bfs_edges(&self, root: &V) -> Result<EdgeList<V>> {
        self.bfs(root).map(|walk| walk.edges)
    }

    /// Nodes of a breadth-first walk from `root`, root first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NodeNotFound`] if `root` is absent.
    pub fn bfs_nodes(&self, root: &V) -> Result<Vec<V>> {
        self.bfs(root).map(|walk| walk.nodes)
    }

    /// The breadth-first tree rooted at `root`, as an undirected, unweighted
    /// graph.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NodeNotFound`] if `root` is absent.
    pub fn bfs_tree(&self, root: &V) -> Result<Self> {
        self.bfs(root).map(Self::from_walk)
    }

    /// Discovery edges of a depth-first walk from `root`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NodeNotFound`] if `root` is absent.
    pub fn dfs_edges(&self, root: &V) -> Result<EdgeList<V>> {
        self.dfs(root).map(|walk| walk.edges)
    }

    /// Nodes of a depth-first walk from `root`, root first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NodeNotFound`] if `root` is absent.
    pub fn dfs_nodes(&self, root: &V) -> Result<Vec<V>> {
        self.dfs(root).map(|walk| walk.nodes)
    }

    /// The depth-first tree rooted at `root`, as an undirected, unweighted
    /// graph.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NodeNotFound`] if `root` is absent.
    pub fn dfs_tree(&self, root: &V) -> Result<Self> {
        self.dfs(root).map(Self::from_walk)
    }

    fn from_walk(walk: Walk<V>) -> Self {
        let mut tree = Self::with_nodes(GraphConfig::undirected(), walk.nodes);
        for (parent, child) in walk.edges {
            tree.add_edge(parent, child);
        }
        tree
    }

    fn resolve_walk(&self, walk: &IndexWalk) -> Walk<V> {
        let store = self.store();
        Walk {
            nodes: walk
                .nodes
                .iter()
                .map(|&n| store.node_at(n).clone())
                .collect(),
            edges: walk
                .edges
                .iter()
                .map(|&(a, b)| (store.node_at(a).clone(), store.node_at(b).clone()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::collections::HashSet;

    fn sample() -> Graph<&'static str> {
        let mut graph =
            Graph::with_nodes(GraphConfig::undirected(), ["a", "b", "c", "d", "e", "f"]);
        graph.add_edge("a", "b");
        graph.add_edge("a", "c");
        graph.add_edge("b", "c");
        graph.add_edge("b", "e");
        graph.add_edge("c", "d");
        graph
    }

    #[test]
    fn test_bfs_nodes_layer_order() {
        let graph = sample();
        assert_eq!(graph.bfs_nodes(&"a").unwrap(), vec!["a", "b", "c", "e", "d"]);
        assert_eq!(
            graph.bfs_edges(&"a").unwrap(),
            vec![("a", "b"), ("a", "c"), ("b", "e"), ("c", "d")]
        );
    }

    #[test]
    fn test_dfs_nodes_preorder() {
        let graph = sample();
        assert_eq!(graph.dfs_nodes(&"a").unwrap(), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(
            graph.dfs_edges(&"a").unwrap(),
            vec![("a", "b"), ("b", "c"), ("c", "d"), ("b", "e")]
        );
    }

    #[test]
    fn test_isolated_root() {
        let graph = sample();
        assert_eq!(graph.bfs_nodes(&"f").unwrap(), vec!["f"]);
        assert_eq!(graph.dfs_nodes(&"f").unwrap(), vec!["f"]);
        assert!(graph.bfs_edges(&"f").unwrap().is_empty());
        assert!(graph.dfs_edges(&"f").unwrap().is_empty());
    }

    #[test]
    fn test_missing_root_fails() {
        let graph = sample();
        assert_eq!(
            graph.bfs_nodes(&"z"),
            Err(Error::node_not_found(&"z"))
        );
        assert!(graph.dfs_tree(&"z").is_err());
    }

    #[test]
    fn test_directed_walk_follows_edge_direction() {
        let mut graph = Graph::directed();
        graph.add_edge(1, 2);
        graph.add_edge(3, 1);
        graph.add_edge(2, 4);

        let reached: HashSet<i32> = graph.bfs_nodes(&1).unwrap().into_iter().collect();
        assert_eq!(reached, HashSet::from([1, 2, 4]));
        assert_eq!(graph.dfs_nodes(&4).unwrap(), vec![4]);
    }

    #[test]
    fn test_bfs_and_dfs_reach_same_set() {
        let graph = sample();
        let bfs: HashSet<_> = graph.bfs_nodes(&"d").unwrap().into_iter().collect();
        let dfs: HashSet<_> = graph.dfs_nodes(&"d").unwrap().into_iter().collect();
        assert_eq!(bfs, dfs);
        assert_eq!(bfs.len(), 5);
    }

    #[test]
    fn test_trees_are_undirected_unweighted() {
        let mut graph = Graph::new(GraphConfig::directed().weighted(true));
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");
        graph.add_edge("a", "c");

        let tree = graph.bfs_tree(&"a").unwrap();
        assert!(!tree.is_directed());
        assert!(!tree.is_weighted());
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.edge_count(), 2);
        assert!(tree.has_edge(&"b", &"a"));

        let tree = graph.dfs_tree(&"a").unwrap();
        assert!(tree.has_edge(&"b", &"c"));
        assert!(!tree.has_edge(&"a", &"c"));
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let mut graph = Graph::directed();
        for i in 0..100_000_u32 {
            graph.add_edge(i, i + 1);
        }
        assert_eq!(graph.dfs_nodes(&0).unwrap().len(), 100_001);
    }

    #[test]
    fn test_back_edge_reported() {
        let mut store = AdjacencyStore::new(GraphConfig::directed());
        store.add_edge("a", "b");
        store.add_edge("b", "a");
        let root = store.index_of(&"a").unwrap();

        let mut back_edges = 0;
        let mut colors = colors(&store);
        depth_first(
            root,
            &mut colors,
            |n| store.successors(n),
            |event| {
                if matches!(event, DfsEvent::BackEdge { .. }) {
                    back_edges += 1;
                }
            },
        );
        assert_eq!(back_edges, 1);
        assert!(colors.iter().all(|&c| c == Color::Black));
    }
}
