//! Schedule stops.

/// An ordered point in a train's itinerary.
///
/// Stops come from the schedule feed and carry schedule-side identifiers;
/// the resolver maps those onto infrastructure nodes. Ordering by
/// `sequence` is the sole ordering invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    /// Position within the itinerary.
    pub sequence: u32,

    /// Schedule-feed stop identifier (e.g. `S8821006`).
    pub stop_id: String,

    /// Display name of the stop (e.g. `Antwerpen-Centraal`).
    pub stop_name: String,
}

impl Stop {
    pub fn new(sequence: u32, stop_id: impl Into<String>, stop_name: impl Into<String>) -> Self {
        Self {
            sequence,
            stop_id: stop_id.into(),
            stop_name: stop_name.into(),
        }
    }
}
