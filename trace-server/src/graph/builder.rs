//! Graph construction from the segment dataset.

use std::collections::HashMap;

use tracing::info;

use crate::domain::{EdgeId, NodeId};
use crate::store::{RailStore, StoreError};

use super::RailwayGraph;
use super::geo;
use super::rules::{self, EdgeRule, VirtualEdge};

/// Last-resort edge weight when a segment has no length and an endpoint has
/// no coordinates.
const FALLBACK_WEIGHT_KM: f64 = 1.0;

/// Errors from building the railway graph.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Loading source data failed; the previous graph (if any) stays in use.
    #[error("failed to load graph source data: {0}")]
    Store(#[from] StoreError),
}

/// Build the railway graph with the default rule set and virtual edges.
pub fn build_graph(store: &dyn RailStore) -> Result<RailwayGraph, BuildError> {
    build_graph_with(store, rules::DEFAULT_RULES, rules::DEFAULT_VIRTUAL_EDGES)
}

/// Build the railway graph with an explicit rule set and virtual edges.
///
/// Weights: declared segment length when present, else haversine distance
/// between endpoint coordinates, else a 1.0 km constant. The rule set is
/// applied per segment and may drop it or scale its weight; surviving edges
/// are inserted undirected. Virtual edges are appended last.
pub fn build_graph_with(
    store: &dyn RailStore,
    edge_rules: &[EdgeRule],
    virtual_edges: &[VirtualEdge],
) -> Result<RailwayGraph, BuildError> {
    let points = store.operational_points()?;
    let coords: HashMap<NodeId, (f64, f64)> = points
        .iter()
        .filter_map(|p| p.coords().map(|c| (p.id.clone(), c)))
        .collect();

    let segments = store.segments()?;
    let mut graph = RailwayGraph::new();
    let mut blocked = 0usize;

    for seg in segments {
        let base = match seg.length_km {
            Some(length) => length,
            None => match (coords.get(&seg.from), coords.get(&seg.to)) {
                (Some(a), Some(b)) => geo::haversine_km(a.0, a.1, b.0, b.1),
                _ => FALLBACK_WEIGHT_KM,
            },
        };

        let Some(weight) = rules::apply_rules(edge_rules, seg.id, &seg.from, &seg.to, base) else {
            blocked += 1;
            continue;
        };

        graph.insert_edge(seg.from, seg.to, weight, EdgeId::Real(seg.id));
    }

    for edge in virtual_edges {
        let (Ok(from), Ok(to)) = (NodeId::parse(edge.from), NodeId::parse(edge.to)) else {
            continue;
        };
        graph.insert_edge(
            from.clone(),
            to.clone(),
            edge.weight,
            EdgeId::Virtual { from, to },
        );
    }

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        blocked,
        "railway graph built"
    );
    Ok(graph)
}
