//! Operational points: the nodes of the infrastructure network.

use super::NodeId;

/// A canonical infrastructure node with optional coordinates.
///
/// Operational points are bulk-loaded at graph-build time and immutable
/// within a build cycle; a fresh load replaces the prior set wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationalPoint {
    /// Symbolic identifier (e.g. `FGSP`).
    pub id: NodeId,

    /// Secondary numeric identifier used by the segment dataset, if any.
    pub ptcar_id: Option<String>,

    /// WGS84 latitude. Absent for some points.
    pub latitude: Option<f64>,

    /// WGS84 longitude. Absent for some points.
    pub longitude: Option<f64>,
}

impl OperationalPoint {
    /// Returns `(latitude, longitude)` when both coordinates are present.
    pub fn coords(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}
