//! Single-pair shortest paths.

use crate::{Error, Graph, NodeId, Result};
use petgraph::stable_graph::NodeIndex;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::debug;

/// A node on the Dijkstra frontier with its tentative distance.
#[derive(Debug, Clone, Copy)]
struct Reached {
    distance: f64,
    node: NodeIndex,
}

impl PartialEq for Reached {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Reached {}

impl PartialOrd for Reached {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Reached {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl<V: NodeId> Graph<V> {
    /// Shortest path between two nodes by Dijkstra's algorithm.
    ///
    /// Edges cost their weight, or `1.0` each in an unweighted graph, and are
    /// followed along their direction when the graph is directed. Returns the
    /// path's edges in order, an empty list when `source == target`, and
    /// `None` when `target` is unreachable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if either endpoint is absent and
    /// [`Error::InvalidOperation`] if a negative weight is encountered.
    pub fn shortest_path(&self, source: &V, target: &V) -> Result<Option<Vec<(V, V)>>> {
        let Some((_, path)) = self.dijkstra(source, target)? else {
            return Ok(None);
        };
        let store = self.store();
        Ok(Some(
            path.windows(2)
                .map(|pair| (store.node_at(pair[0]).clone(), store.node_at(pair[1]).clone()))
                .collect(),
        ))
    }

    /// Cost of the shortest path between two nodes, or `None` when `target`
    /// is unreachable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if either endpoint is absent and
    /// [`Error::InvalidOperation`] if a negative weight is encountered.
    pub fn shortest_path_length(&self, source: &V, target: &V) -> Result<Option<f64>> {
        Ok(self
            .dijkstra(source, target)?
            .map(|(distance, _)| distance))
    }

    fn dijkstra(&self, source: &V, target: &V) -> Result<Option<(f64, Vec<NodeIndex>)>> {
        let store = self.store();
        let source = store.index_of(source)?;
        let target = store.index_of(target)?;

        let mut distance = vec![f64::INFINITY; store.node_bound()];
        let mut previous: Vec<Option<NodeIndex>> = vec![None; store.node_bound()];
        let mut settled = vec![false; store.node_bound()];
        let mut frontier = BinaryHeap::from([Reached {
            distance: 0.0,
            node: source,
        }]);
        distance[source.index()] = 0.0;

        while let Some(Reached { distance: d, node }) = frontier.pop() {
            if settled[node.index()] {
                continue;
            }
            settled[node.index()] = true;
            if node == target {
                break;
            }

            for child in store.successors(node) {
                let Some(edge) = store.find_edge_index(node, child) else {
                    continue;
                };
                let weight = store.edge_weight(edge);
                if weight < 0.0 {
                    return Err(Error::invalid_operation(
                        "shortest_path",
                        format!(
                            "edge ({:?}, {:?}) has negative weight {weight}",
                            store.node_at(node),
                            store.node_at(child)
                        ),
                    ));
                }
                let candidate = d + weight;
                if candidate < distance[child.index()] {
                    distance[child.index()] = candidate;
                    previous[child.index()] = Some(node);
                    frontier.push(Reached {
                        distance: candidate,
                        node: child,
                    });
                }
            }
        }

        if !settled[target.index()] {
            debug!("No path from {:?} to {:?}", store.node_at(source), store.node_at(target));
            return Ok(None);
        }

        let mut path = vec![target];
        let mut current = target;
        while let Some(parent) = previous[current.index()] {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        Ok(Some((distance[target.index()], path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphConfig;

    fn weighted() -> Graph<&'static str> {
        let mut graph = Graph::new(GraphConfig::undirected().weighted(true));
        graph.add_weighted_edge("a", "b", 2.0).unwrap();
        graph.add_weighted_edge("b", "c", 1.0).unwrap();
        graph.add_weighted_edge("a", "c", 5.0).unwrap();
        graph.add_weighted_edge("c", "d", 2.0).unwrap();
        graph.add_node("z");
        graph
    }

    #[test]
    fn test_shortest_path_prefers_lighter_route() {
        let graph = weighted();
        assert_eq!(
            graph.shortest_path(&"a", &"d").unwrap(),
            Some(vec![("a", "b"), ("b", "c"), ("c", "d")])
        );
        assert_eq!(graph.shortest_path_length(&"a", &"d").unwrap(), Some(5.0));
    }

    #[test]
    fn test_shortest_path_undirected_either_way() {
        let graph = weighted();
        assert_eq!(
            graph.shortest_path(&"d", &"a").unwrap(),
            Some(vec![("d", "c"), ("c", "b"), ("b", "a")])
        );
    }

    #[test]
    fn test_shortest_path_to_self() {
        let graph = weighted();
        assert_eq!(graph.shortest_path(&"a", &"a").unwrap(), Some(vec![]));
        assert_eq!(graph.shortest_path_length(&"a", &"a").unwrap(), Some(0.0));
    }

    #[test]
    fn test_unreachable_target() {
        let graph = weighted();
        assert_eq!(graph.shortest_path(&"a", &"z").unwrap(), None);
    }

    #[test]
    fn test_directed_path_follows_direction() {
        let mut graph = Graph::directed();
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        assert_eq!(graph.shortest_path_length(&1, &3).unwrap(), Some(2.0));
        assert_eq!(graph.shortest_path(&3, &1).unwrap(), None);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut graph = Graph::new(GraphConfig::directed().weighted(true));
        graph.add_weighted_edge(1, 2, -1.0).unwrap();
        assert!(matches!(
            graph.shortest_path(&1, &2),
            Err(Error::InvalidOperation { .. })
        ));
    }

    #[test]
    fn test_missing_endpoint() {
        let graph = weighted();
        assert!(matches!(
            graph.shortest_path(&"a", &"nope"),
            Err(Error::NodeNotFound { .. })
        ));
    }
}
