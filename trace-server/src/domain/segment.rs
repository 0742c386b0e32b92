//! Track segments and edge identifiers.

use std::fmt;

use super::NodeId;

/// A physical track link between two infrastructure nodes.
///
/// Segments come from the infrastructure dataset. Length and geometry are
/// both optional: the dataset has gaps, and the graph builder falls back to
/// geodesic distance (or a constant) when the length is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Dataset identifier, unique among real segments.
    pub id: i64,

    /// One endpoint. Traversal is undirected; "from"/"to" only reflect how
    /// the dataset happened to record the segment.
    pub from: NodeId,

    /// The other endpoint.
    pub to: NodeId,

    /// Declared length in kilometers, when the dataset provides one.
    pub length_km: Option<f64>,

    /// GeoJSON-shaped line geometry payload. May be absent or unparseable;
    /// consumers skip it silently in that case.
    pub geometry: Option<String>,
}

/// Identifier of a traversed graph edge.
///
/// Real edges are backed by a stored [`Segment`]; virtual edges are synthetic
/// connectors patching known gaps in the segment dataset. The display form of
/// a virtual edge is `V_<FROM>_<TO>`, distinguishable from real integer ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EdgeId {
    /// A stored segment, by its dataset id.
    Real(i64),

    /// A synthetic connector between two named nodes.
    Virtual { from: NodeId, to: NodeId },
}

impl EdgeId {
    /// Whether this edge is a synthetic connector.
    pub fn is_virtual(&self) -> bool {
        matches!(self, EdgeId::Virtual { .. })
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeId::Real(id) => write!(f, "{id}"),
            EdgeId::Virtual { from, to } => write!(f, "V_{from}_{to}"),
        }
    }
}
