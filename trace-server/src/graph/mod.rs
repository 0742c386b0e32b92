//! The railway infrastructure graph.
//!
//! An undirected weighted multigraph over operational points, built from the
//! segment dataset with manual weight overrides and virtual connectors. The
//! graph is process-wide shared state: built wholesale, swapped atomically,
//! never mutated in place (see [`SharedGraph`]).

pub mod geo;
pub mod rules;

mod builder;
mod shared;

pub use builder::{BuildError, build_graph, build_graph_with};
pub use shared::SharedGraph;

use std::collections::HashMap;

use crate::domain::{EdgeId, NodeId};

/// One directed adjacency entry.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub to: NodeId,
    pub weight: f64,
    pub id: EdgeId,
}

/// Undirected weighted multigraph over infrastructure nodes.
///
/// Every undirected edge is stored as two directed entries of equal weight.
/// Parallel edges between the same node pair are allowed (the dataset has
/// them); they are distinguished by edge id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RailwayGraph {
    adjacency: HashMap<NodeId, Vec<GraphEdge>>,
    edge_count: usize,
}

impl RailwayGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an undirected edge. Self-loops get a single entry; the path
    /// finder tolerates them but never traverses them.
    pub fn insert_edge(&mut self, from: NodeId, to: NodeId, weight: f64, id: EdgeId) {
        if from == to {
            self.adjacency.entry(from).or_default().push(GraphEdge {
                to,
                weight,
                id,
            });
        } else {
            self.adjacency
                .entry(from.clone())
                .or_default()
                .push(GraphEdge {
                    to: to.clone(),
                    weight,
                    id: id.clone(),
                });
            self.adjacency
                .entry(to)
                .or_default()
                .push(GraphEdge { to: from, weight, id });
        }
        self.edge_count += 1;
    }

    /// Whether a node has any adjacency entry.
    pub fn contains(&self, node: &NodeId) -> bool {
        self.adjacency.contains_key(node)
    }

    /// The directed adjacency entries of a node.
    pub fn neighbors(&self, node: &NodeId) -> &[GraphEdge] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of nodes with at least one edge.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}
