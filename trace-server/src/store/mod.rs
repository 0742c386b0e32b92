//! Read-only data stores consumed by the trace engine.
//!
//! The engine treats its data sources as read-only snapshots: station
//! mappings, stop aliases, operational points, segments, and per-train stop
//! lists. [`RailStore`] is the seam between the engine and whatever actually
//! holds the data; [`MemoryStore`] is the JSON-file-backed implementation
//! used by the server and by tests.

mod error;
mod memory;

pub use error::StoreError;
pub use memory::{MemoryStore, MemoryStoreBuilder, StopAlias};

use crate::domain::{NodeId, OperationalPoint, Segment, Stop};

/// Access to the rail data snapshot backing the engine.
///
/// Bulk loads are fallible so that implementations backed by an external
/// source can report unavailability; point lookups are infallible because
/// they only consult already-loaded data.
pub trait RailStore: Send + Sync {
    /// Exact station-mapping lookup: schedule stop id -> canonical node.
    fn mapping(&self, stop_id: &str) -> Option<NodeId>;

    /// Substring station-mapping lookup: any mapping whose stop id contains
    /// the given digit run. Used as a last-resort match for reformatted ids.
    fn mapping_containing(&self, digits: &str) -> Option<NodeId>;

    /// Fuzzy alias lookup: any alias record whose original or translated
    /// name contains `needle` (case-insensitive). Returns the record's
    /// schedule stop id.
    fn alias_stop_id(&self, needle: &str) -> Option<String>;

    /// All operational points.
    fn operational_points(&self) -> Result<Vec<OperationalPoint>, StoreError>;

    /// A single operational point by node id.
    fn point(&self, id: &NodeId) -> Option<OperationalPoint>;

    /// All track segments.
    fn segments(&self) -> Result<Vec<Segment>, StoreError>;

    /// A single segment by dataset id.
    fn segment(&self, id: i64) -> Option<Segment>;

    /// The stops of a train, ordered by sequence.
    fn train_stops(&self, train_id: &str) -> Vec<Stop>;

    /// `(latitude, longitude)` of a node, when both coordinates are known.
    fn coords(&self, id: &NodeId) -> Option<(f64, f64)> {
        self.point(id).and_then(|p| p.coords())
    }
}
