//! Shortest-path search over the railway graph.
//!
//! Plain Dijkstra over non-negative edge weights. Every call is a fresh
//! single-source search bounded by reachability from the start node; the
//! graph is small (national network scale), so there is no precomputation.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use ordered_float::OrderedFloat;

use crate::domain::{EdgeId, NodeId};
use crate::graph::RailwayGraph;

/// Find the minimum-weight path between two nodes.
///
/// Returns the ordered edge ids of the path, `Some(vec![])` when start and
/// end coincide (a zero-length path, distinct from "no path"), and `None`
/// when the graph is empty, either node is absent, or the nodes are in
/// disconnected components.
pub fn shortest_path(graph: &RailwayGraph, start: &NodeId, end: &NodeId) -> Option<Vec<EdgeId>> {
    if graph.is_empty() {
        return None;
    }
    if start == end {
        return if graph.contains(start) {
            Some(Vec::new())
        } else {
            None
        };
    }
    if !graph.contains(start) || !graph.contains(end) {
        return None;
    }

    let mut dist: HashMap<NodeId, f64> = HashMap::new();
    let mut prev: HashMap<NodeId, (NodeId, EdgeId)> = HashMap::new();
    let mut frontier: BinaryHeap<Reverse<(OrderedFloat<f64>, NodeId)>> = BinaryHeap::new();

    dist.insert(start.clone(), 0.0);
    frontier.push(Reverse((OrderedFloat(0.0), start.clone())));

    while let Some(Reverse((OrderedFloat(cost), node))) = frontier.pop() {
        // Stale entry: this node was already finalized at a lower cost.
        if dist.get(&node).is_some_and(|&d| cost > d) {
            continue;
        }
        if &node == end {
            return Some(reconstruct(&prev, start, end));
        }

        for edge in graph.neighbors(&node) {
            // Self-loops are tolerated in the graph but never a step.
            if edge.to == node {
                continue;
            }
            let next_cost = cost + edge.weight;
            if dist.get(&edge.to).is_none_or(|&d| next_cost < d) {
                dist.insert(edge.to.clone(), next_cost);
                prev.insert(edge.to.clone(), (node.clone(), edge.id.clone()));
                frontier.push(Reverse((OrderedFloat(next_cost), edge.to.clone())));
            }
        }
    }

    None
}

/// Walk the predecessor map back from `end` to `start`.
fn reconstruct(prev: &HashMap<NodeId, (NodeId, EdgeId)>, start: &NodeId, end: &NodeId) -> Vec<EdgeId> {
    let mut edges = Vec::new();
    let mut node = end;
    while node != start {
        let (parent, edge) = &prev[node];
        edges.push(edge.clone());
        node = parent;
    }
    edges.reverse();
    edges
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::graph::build_graph_with;
    use crate::store::MemoryStoreBuilder;
    use proptest::prelude::*;

    /// Random small graphs: up to 26 nodes A..Z, random weighted edges.
    fn arb_edges() -> impl Strategy<Value = Vec<(u8, u8, f64)>> {
        prop::collection::vec((0u8..12, 0u8..12, 0.1f64..100.0), 1..40)
    }

    fn node_name(i: u8) -> String {
        char::from(b'A' + i).to_string()
    }

    proptest! {
        /// A found path always starts at `start` and ends at `end` when
        /// walked edge by edge through the adjacency.
        #[test]
        fn path_is_connected(edges in arb_edges(), s in 0u8..12, e in 0u8..12) {
            let mut builder = MemoryStoreBuilder::new();
            for (i, (a, b, w)) in edges.iter().enumerate() {
                builder = builder.segment(i as i64, &node_name(*a), &node_name(*b), Some(*w), None);
            }
            let g = build_graph_with(&builder.build(), &[], &[]).unwrap();

            let start = NodeId::parse(&node_name(s)).unwrap();
            let end = NodeId::parse(&node_name(e)).unwrap();

            if let Some(path) = shortest_path(&g, &start, &end) {
                let mut at = start.clone();
                for id in &path {
                    let step = g.neighbors(&at).iter().find(|edge| &edge.id == id);
                    prop_assert!(step.is_some(), "edge {id} not adjacent to {at}");
                    at = step.unwrap().to.clone();
                }
                prop_assert_eq!(at, end);
            }
        }

        /// Start == end yields the empty path whenever the node exists.
        #[test]
        fn identity_path(edges in arb_edges(), s in 0u8..12) {
            let mut builder = MemoryStoreBuilder::new();
            for (i, (a, b, w)) in edges.iter().enumerate() {
                builder = builder.segment(i as i64, &node_name(*a), &node_name(*b), Some(*w), None);
            }
            let g = build_graph_with(&builder.build(), &[], &[]).unwrap();
            let start = NodeId::parse(&node_name(s)).unwrap();

            if g.contains(&start) {
                prop_assert_eq!(shortest_path(&g, &start, &start), Some(vec![]));
            }
        }
    }
}
