//! Trace assembly: stitching per-stop shortest paths into one geometry.
//!
//! Given a train's ordered stops, the assembler resolves each stop to an
//! infrastructure node, runs shortest-path search between consecutive nodes,
//! and renders the traversed segments as a single GeoJSON feature
//! collection. Gaps are expected: unresolvable stops are skipped, and pairs
//! with no path fall back to a straight line.

use std::sync::Arc;

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use tracing::debug;

use crate::domain::{EdgeId, NodeId, Stop};
use crate::graph::{RailwayGraph, SharedGraph, geo};
use crate::path::shortest_path;
use crate::resolver::Resolver;
use crate::store::RailStore;

/// Nominal per-edge distance when a segment has no stored length (also used
/// for virtual edges, which have no segment record at all).
const NOMINAL_EDGE_KM: f64 = 0.1;

/// Last-resort per-pair distance when even coordinates are unavailable.
const LAST_RESORT_KM: f64 = 1.0;

/// How a synthesized straight-line feature is tagged.
#[derive(Clone, Copy)]
enum LineTag {
    /// Rendering of a virtual edge between physically adjacent nodes.
    Virtual,

    /// Stand-in for a pair with no path in the graph.
    Fallback,
}

impl LineTag {
    fn property(self) -> &'static str {
        match self {
            LineTag::Virtual => "virtual",
            LineTag::Fallback => "fallback",
        }
    }
}

/// Assembles traces and journey distances for trains.
#[derive(Clone)]
pub struct TraceAssembler {
    store: Arc<dyn RailStore>,
    graph: SharedGraph,
    resolver: Resolver,
}

impl TraceAssembler {
    pub fn new(store: Arc<dyn RailStore>, graph: SharedGraph, resolver: Resolver) -> Self {
        Self {
            store,
            graph,
            resolver,
        }
    }

    /// Assemble the physical trace of a train over an optional stop range.
    ///
    /// Returns `None` when fewer than two stops remain after range filtering
    /// or fewer than two of them resolve to nodes in the current graph.
    pub async fn trace_geometry(
        &self,
        train_id: &str,
        from_stop: Option<&str>,
        to_stop: Option<&str>,
    ) -> Option<FeatureCollection> {
        let graph = self.graph.ensure().await?;

        let stops = filter_range(self.store.train_stops(train_id), from_stop, to_stop);
        if stops.len() < 2 {
            return None;
        }

        let nodes = self.resolve_in_graph(&stops, &graph);
        if nodes.len() < 2 {
            return None;
        }

        let mut features = Vec::new();
        for pair in nodes.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            match shortest_path(&graph, a, b) {
                Some(path) => {
                    for edge in path {
                        let feature = match edge {
                            EdgeId::Real(id) => self.segment_feature(id),
                            EdgeId::Virtual { from, to } => {
                                self.straight_feature(&from, &to, LineTag::Virtual)
                            }
                        };
                        features.extend(feature);
                    }
                }
                None => {
                    debug!(from = %a, to = %b, "no path, using straight-line fallback");
                    features.extend(self.straight_feature(a, b, LineTag::Fallback));
                }
            }
        }

        Some(FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        })
    }

    /// Total physical distance of a train journey over an optional stop
    /// range, in kilometers rounded to two decimals.
    pub async fn journey_distance(
        &self,
        train_id: &str,
        from_stop: Option<&str>,
        to_stop: Option<&str>,
    ) -> f64 {
        let Some(graph) = self.graph.ensure().await else {
            return 0.0;
        };

        let stops = filter_range(self.store.train_stops(train_id), from_stop, to_stop);
        if stops.len() < 2 {
            return 0.0;
        }

        let nodes = self.resolve_in_graph(&stops, &graph);

        let mut total = 0.0;
        for pair in nodes.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            match shortest_path(&graph, a, b) {
                Some(path) => {
                    for edge in path {
                        total += match edge {
                            EdgeId::Real(id) => self
                                .store
                                .segment(id)
                                .and_then(|s| s.length_km)
                                .unwrap_or(NOMINAL_EDGE_KM),
                            EdgeId::Virtual { .. } => NOMINAL_EDGE_KM,
                        };
                    }
                }
                None => {
                    total += match (self.store.coords(a), self.store.coords(b)) {
                        (Some(p1), Some(p2)) => {
                            geo::haversine_m(p1.0, p1.1, p2.0, p2.1) / 1000.0
                        }
                        _ => LAST_RESORT_KM,
                    };
                }
            }
        }

        (total * 100.0).round() / 100.0
    }

    /// Resolve stops to nodes, keeping only nodes present in the graph.
    fn resolve_in_graph(&self, stops: &[Stop], graph: &RailwayGraph) -> Vec<NodeId> {
        stops
            .iter()
            .filter_map(|s| self.resolver.resolve(&s.stop_id, Some(&s.stop_name)))
            .filter(|node| graph.contains(node))
            .collect()
    }

    /// Render a stored segment's geometry payload as a feature.
    ///
    /// Missing segments and unparseable payloads are skipped silently; a
    /// single bad record must not abort the whole trace.
    fn segment_feature(&self, segment_id: i64) -> Option<Feature> {
        let segment = self.store.segment(segment_id)?;
        let raw = segment.geometry.as_deref()?;
        let geometry: Geometry = match serde_json::from_str(raw) {
            Ok(g) => g,
            Err(e) => {
                debug!(segment = segment_id, error = %e, "skipping unparseable geometry");
                return None;
            }
        };

        let mut properties = JsonObject::new();
        properties.insert(
            "from_id".to_owned(),
            JsonValue::String(segment.from.to_string()),
        );
        properties.insert(
            "to_id".to_owned(),
            JsonValue::String(segment.to.to_string()),
        );

        Some(Feature {
            bbox: None,
            geometry: Some(geometry),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        })
    }

    /// Synthesize a straight two-point line between two nodes' coordinates.
    fn straight_feature(&self, from: &NodeId, to: &NodeId, tag: LineTag) -> Option<Feature> {
        let (lat1, lon1) = self.store.coords(from)?;
        let (lat2, lon2) = self.store.coords(to)?;

        // GeoJSON positions are [longitude, latitude]
        let line = Value::LineString(vec![vec![lon1, lat1], vec![lon2, lat2]]);

        let mut properties = JsonObject::new();
        properties.insert("from_id".to_owned(), JsonValue::String(from.to_string()));
        properties.insert("to_id".to_owned(), JsonValue::String(to.to_string()));
        properties.insert(tag.property().to_owned(), JsonValue::Bool(true));

        Some(Feature {
            bbox: None,
            geometry: Some(Geometry::new(line)),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        })
    }
}

/// Slice stops to the inclusive `[from_stop, to_stop]` range.
///
/// An omitted `from_stop` starts the range at the first stop; an omitted
/// `to_stop` runs it to the end. A `from_stop` that never matches yields an
/// empty range.
fn filter_range(stops: Vec<Stop>, from_stop: Option<&str>, to_stop: Option<&str>) -> Vec<Stop> {
    if from_stop.is_none() && to_stop.is_none() {
        return stops;
    }

    let mut filtered = Vec::new();
    let mut in_range = from_stop.is_none();
    for stop in stops {
        if from_stop == Some(stop.stop_id.as_str()) {
            in_range = true;
        }
        let is_end = to_stop == Some(stop.stop_id.as_str());
        if in_range {
            filtered.push(stop);
        }
        if is_end {
            break;
        }
    }
    filtered
}
