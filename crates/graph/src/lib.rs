//! Graph data structure and algorithms.
//!
//! This crate provides a general-purpose graph over caller-chosen node
//! values, stored in a petgraph adjacency structure and exposed through a
//! single [`Graph`] type. Graphs are directed or undirected and weighted or
//! unweighted, fixed at construction by a [`GraphConfig`].
//!
//! # Key Types
//!
//! - [`Graph`]: The public graph type composing every operation below
//! - [`GraphConfig`]: The directed/weighted flags
//! - [`NodeId`]: Bound satisfied by any type usable as a node
//!
//! # Operations
//!
//! - Mutation and queries: nodes, edges, weights, degrees, neighbourhoods
//! - Traversal: breadth-first and depth-first walks and trees
//! - Connectivity: connected, weakly and strongly connected components
//! - Acyclicity: DAG detection, topological sort, lowest common ancestor
//! - Spanning trees: Prim's minimum spanning tree and forest
//! - Paths: Dijkstra shortest paths
//!
//! # Example
//!
//! ```rust
//! use graphkit::{Graph, GraphConfig};
//!
//! let mut graph = Graph::new(GraphConfig::undirected());
//! graph.add_nodes(["a", "b", "c", "d", "e", "f"]);
//! graph.add_edge("a", "b");
//! graph.add_edge("a", "c");
//! graph.add_edge("b", "c");
//! graph.add_edge("b", "e");
//! graph.add_edge("c", "d");
//!
//! assert_eq!(graph.degree(&"a")?, 2);
//! assert!(!graph.is_connected()?);
//! assert_eq!(graph.number_connected_components()?, 2);
//! assert_eq!(graph.bfs_nodes(&"a")?, vec!["a", "b", "c", "e", "d"]);
//! # Ok::<(), graphkit::Error>(())
//! ```

mod acyclic;
mod config;
mod connectivity;
mod error;
mod graph;
mod paths;
mod spanning;
mod store;
mod traversal;

pub use config::GraphConfig;
pub use error::{Error, Result};
pub use graph::Graph;
pub use store::DEFAULT_WEIGHT;
pub use traversal::{EdgeList, Walk};

pub(crate) use store::AdjacencyStore;

use std::fmt::Debug;
use std::hash::Hash;

/// Bound for values usable as graph nodes.
///
/// Blanket-implemented for every `Clone + Eq + Hash + Debug` type, so
/// strings, integers and caller-defined keys all work without extra code.
/// `Debug` lets errors and log events name the node involved.
pub trait NodeId: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> NodeId for T {}
