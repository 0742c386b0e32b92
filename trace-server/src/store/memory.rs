//! In-memory rail data store, loadable from JSON files.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::{NodeId, OperationalPoint, Segment, Stop};

use super::RailStore;
use super::error::StoreError;

/// An alias record linking a display name to a schedule stop id.
///
/// The alias table carries both the feed's original name and its translation,
/// and the resolver's name fallback searches both fields.
#[derive(Debug, Clone)]
pub struct StopAlias {
    pub stop_id: String,
    pub original: String,
    pub translated: String,
}

/// In-memory snapshot of all rail data the engine consumes.
///
/// Built either from JSON files via [`MemoryStore::from_dir`] or
/// programmatically via [`MemoryStoreBuilder`] (mostly for tests).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Schedule stop id -> canonical node. BTreeMap so that substring
    /// matches are deterministic (smallest stop id wins).
    mappings: BTreeMap<String, NodeId>,
    aliases: Vec<StopAlias>,
    points: HashMap<NodeId, OperationalPoint>,
    segments: HashMap<i64, Segment>,
    stops: HashMap<String, Vec<Stop>>,
}

/// JSON shape of an operational point record.
#[derive(Debug, Deserialize)]
struct PointRecord {
    id: String,
    #[serde(default)]
    ptcar_id: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
}

/// JSON shape of a segment record.
#[derive(Debug, Deserialize)]
struct SegmentRecord {
    id: i64,
    from: String,
    to: String,
    #[serde(default)]
    length_km: Option<f64>,
    #[serde(default)]
    geometry: Option<String>,
}

/// JSON shape of a station mapping record.
#[derive(Debug, Deserialize)]
struct MappingRecord {
    stop_id: String,
    node_id: String,
}

/// JSON shape of an alias record.
#[derive(Debug, Deserialize)]
struct AliasRecord {
    stop_id: String,
    original: String,
    #[serde(default)]
    translated: Option<String>,
}

/// JSON shape of a train stop record.
#[derive(Debug, Deserialize)]
struct StopRecord {
    sequence: u32,
    stop_id: String,
    stop_name: String,
}

fn read_json<T: for<'de> Deserialize<'de>>(dir: &Path, file: &str) -> Result<T, StoreError> {
    let path = dir.join(file);
    let raw = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
        file: file.to_owned(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|e| StoreError::Malformed {
        file: file.to_owned(),
        message: e.to_string(),
    })
}

impl MemoryStore {
    /// Load a snapshot from a directory of JSON files.
    ///
    /// Expects `operational_points.json`, `segments.json`,
    /// `station_mappings.json`, `stop_aliases.json`, and `train_stops.json`.
    /// Records with invalid node ids are skipped with a warning rather than
    /// failing the whole load.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();

        let point_records: Vec<PointRecord> = read_json(dir, "operational_points.json")?;
        let segment_records: Vec<SegmentRecord> = read_json(dir, "segments.json")?;
        let mapping_records: Vec<MappingRecord> = read_json(dir, "station_mappings.json")?;
        let alias_records: Vec<AliasRecord> = read_json(dir, "stop_aliases.json")?;
        let stop_records: HashMap<String, Vec<StopRecord>> = read_json(dir, "train_stops.json")?;

        let mut points = HashMap::new();
        for record in point_records {
            match NodeId::parse(&record.id) {
                Ok(id) => {
                    points.insert(
                        id.clone(),
                        OperationalPoint {
                            id,
                            ptcar_id: record.ptcar_id,
                            latitude: record.latitude,
                            longitude: record.longitude,
                        },
                    );
                }
                Err(e) => warn!(id = %record.id, error = %e, "skipping operational point"),
            }
        }

        let mut segments = HashMap::new();
        for record in segment_records {
            match (NodeId::parse(&record.from), NodeId::parse(&record.to)) {
                (Ok(from), Ok(to)) => {
                    segments.insert(
                        record.id,
                        Segment {
                            id: record.id,
                            from,
                            to,
                            length_km: record.length_km,
                            geometry: record.geometry,
                        },
                    );
                }
                _ => warn!(id = record.id, "skipping segment with invalid endpoint"),
            }
        }

        let mut mappings = BTreeMap::new();
        for record in mapping_records {
            match NodeId::parse(&record.node_id) {
                Ok(node) => {
                    mappings.insert(record.stop_id, node);
                }
                Err(e) => warn!(stop_id = %record.stop_id, error = %e, "skipping mapping"),
            }
        }

        let aliases = alias_records
            .into_iter()
            .map(|r| StopAlias {
                stop_id: r.stop_id,
                translated: r.translated.unwrap_or_else(|| r.original.clone()),
                original: r.original,
            })
            .collect();

        let mut stops: HashMap<String, Vec<Stop>> = HashMap::new();
        for (train_id, records) in stop_records {
            let mut train_stops: Vec<Stop> = records
                .into_iter()
                .map(|r| Stop::new(r.sequence, r.stop_id, r.stop_name))
                .collect();
            train_stops.sort_by_key(|s| s.sequence);
            stops.insert(train_id, train_stops);
        }

        let store = Self {
            mappings,
            aliases,
            points,
            segments,
            stops,
        };
        info!(
            points = store.points.len(),
            segments = store.segments.len(),
            mappings = store.mappings.len(),
            "loaded rail data snapshot"
        );
        Ok(store)
    }
}

impl RailStore for MemoryStore {
    fn mapping(&self, stop_id: &str) -> Option<NodeId> {
        self.mappings.get(stop_id).cloned()
    }

    fn mapping_containing(&self, digits: &str) -> Option<NodeId> {
        self.mappings
            .iter()
            .find(|(stop_id, _)| stop_id.contains(digits))
            .map(|(_, node)| node.clone())
    }

    fn alias_stop_id(&self, needle: &str) -> Option<String> {
        let needle = needle.to_lowercase();
        self.aliases
            .iter()
            .find(|a| {
                a.original.to_lowercase().contains(&needle)
                    || a.translated.to_lowercase().contains(&needle)
            })
            .map(|a| a.stop_id.clone())
    }

    fn operational_points(&self) -> Result<Vec<OperationalPoint>, StoreError> {
        Ok(self.points.values().cloned().collect())
    }

    fn point(&self, id: &NodeId) -> Option<OperationalPoint> {
        self.points.get(id).cloned()
    }

    fn segments(&self) -> Result<Vec<Segment>, StoreError> {
        Ok(self.segments.values().cloned().collect())
    }

    fn segment(&self, id: i64) -> Option<Segment> {
        self.segments.get(&id).cloned()
    }

    fn train_stops(&self, train_id: &str) -> Vec<Stop> {
        self.stops.get(train_id).cloned().unwrap_or_default()
    }
}

/// Builder for assembling a [`MemoryStore`] programmatically.
#[derive(Debug, Default)]
pub struct MemoryStoreBuilder {
    inner: MemoryStore,
}

impl MemoryStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operational point. Invalid node ids are ignored.
    pub fn point(mut self, id: &str, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        if let Ok(node) = NodeId::parse(id) {
            self.inner.points.insert(
                node.clone(),
                OperationalPoint {
                    id: node,
                    ptcar_id: None,
                    latitude,
                    longitude,
                },
            );
        }
        self
    }

    /// Add a segment. Invalid endpoints are ignored.
    pub fn segment(
        mut self,
        id: i64,
        from: &str,
        to: &str,
        length_km: Option<f64>,
        geometry: Option<&str>,
    ) -> Self {
        if let (Ok(from), Ok(to)) = (NodeId::parse(from), NodeId::parse(to)) {
            self.inner.segments.insert(
                id,
                Segment {
                    id,
                    from,
                    to,
                    length_km,
                    geometry: geometry.map(str::to_owned),
                },
            );
        }
        self
    }

    /// Add a station mapping. Invalid node ids are ignored.
    pub fn mapping(mut self, stop_id: &str, node_id: &str) -> Self {
        if let Ok(node) = NodeId::parse(node_id) {
            self.inner.mappings.insert(stop_id.to_owned(), node);
        }
        self
    }

    /// Add an alias record.
    pub fn alias(mut self, stop_id: &str, original: &str, translated: &str) -> Self {
        self.inner.aliases.push(StopAlias {
            stop_id: stop_id.to_owned(),
            original: original.to_owned(),
            translated: translated.to_owned(),
        });
        self
    }

    /// Set the stops of a train. Stops are sorted by sequence.
    pub fn train(mut self, train_id: &str, stops: Vec<Stop>) -> Self {
        let mut stops = stops;
        stops.sort_by_key(|s| s.sequence);
        self.inner.stops.insert(train_id.to_owned(), stops);
        self
    }

    pub fn build(self) -> MemoryStore {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_lookups() {
        let store = MemoryStoreBuilder::new()
            .point("FN", Some(51.2172), Some(4.4211))
            .point("FCV", Some(51.1992), Some(4.4320))
            .segment(1, "FN", "FCV", Some(2.3), None)
            .mapping("S8821006", "FN")
            .alias("S8821006", "Antwerpen-Centraal", "Anvers-Central")
            .build();

        assert_eq!(
            store.mapping("S8821006"),
            Some(NodeId::parse("FN").unwrap())
        );
        assert!(store.mapping("S9999999").is_none());

        let seg = store.segment(1).unwrap();
        assert_eq!(seg.from.as_str(), "FN");
        assert_eq!(seg.length_km, Some(2.3));

        assert_eq!(
            store.coords(&NodeId::parse("FN").unwrap()),
            Some((51.2172, 4.4211))
        );
    }

    #[test]
    fn mapping_containing_matches_substring() {
        let store = MemoryStoreBuilder::new()
            .mapping("S8821006", "FN")
            .mapping("S8892007", "FGSP")
            .build();

        assert_eq!(
            store.mapping_containing("8892007"),
            Some(NodeId::parse("FGSP").unwrap())
        );
        assert!(store.mapping_containing("12345").is_none());
    }

    #[test]
    fn mapping_containing_is_deterministic() {
        // Both stop ids contain "88210"; the smaller key must win.
        let store = MemoryStoreBuilder::new()
            .mapping("S8821006", "FN")
            .mapping("S8821099", "FCV")
            .build();

        assert_eq!(
            store.mapping_containing("88210"),
            Some(NodeId::parse("FN").unwrap())
        );
    }

    #[test]
    fn alias_search_is_case_insensitive_on_both_fields() {
        let store = MemoryStoreBuilder::new()
            .alias("S8821006", "Antwerpen-Centraal", "Anvers-Central")
            .build();

        assert_eq!(
            store.alias_stop_id("antwerpen"),
            Some("S8821006".to_owned())
        );
        assert_eq!(store.alias_stop_id("anvers"), Some("S8821006".to_owned()));
        assert!(store.alias_stop_id("bruxelles").is_none());
    }

    #[test]
    fn train_stops_returns_empty_for_unknown_train() {
        let store = MemoryStore::default();
        assert!(store.train_stops("IC-540").is_empty());
    }

    #[test]
    fn train_stops_ordered_by_sequence() {
        let store = MemoryStoreBuilder::new()
            .train(
                "IC-540",
                vec![
                    Stop::new(3, "S3", "Gent-Sint-Pieters"),
                    Stop::new(1, "S1", "Antwerpen-Centraal"),
                    Stop::new(2, "S2", "Sint-Niklaas"),
                ],
            )
            .build();

        let stops = store.train_stops("IC-540");
        let ids: Vec<&str> = stops.iter().map(|s| s.stop_id.as_str()).collect();
        assert_eq!(ids, ["S1", "S2", "S3"]);
    }

    #[test]
    fn from_dir_loads_all_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("operational_points.json"),
            r#"[
                {"id": "FN", "latitude": 51.2172, "longitude": 4.4211},
                {"id": "bad id", "latitude": 0.0, "longitude": 0.0},
                {"id": "FCV", "ptcar_id": "279"}
            ]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("segments.json"),
            r#"[
                {"id": 1, "from": "FN", "to": "FCV", "length_km": 2.3},
                {"id": 2, "from": "FN", "to": "???"}
            ]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("station_mappings.json"),
            r#"[{"stop_id": "S8821006", "node_id": "FN"}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("stop_aliases.json"),
            r#"[{"stop_id": "S8821006", "original": "Antwerpen-Centraal"}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("train_stops.json"),
            r#"{"IC-540": [
                {"sequence": 2, "stop_id": "S2", "stop_name": "Berchem"},
                {"sequence": 1, "stop_id": "S1", "stop_name": "Antwerpen-Centraal"}
            ]}"#,
        )
        .unwrap();

        let store = MemoryStore::from_dir(dir.path()).unwrap();

        // Invalid records are skipped, valid ones kept
        assert_eq!(store.operational_points().unwrap().len(), 2);
        assert_eq!(store.segments().unwrap().len(), 1);
        assert!(store.mapping("S8821006").is_some());

        // Alias with no translation falls back to the original name
        assert_eq!(store.alias_stop_id("antwerpen"), Some("S8821006".into()));

        let stops = store.train_stops("IC-540");
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].stop_id, "S1");
    }

    #[test]
    fn from_dir_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = MemoryStore::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn from_dir_malformed_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("operational_points.json"), "not json").unwrap();
        let err = MemoryStore::from_dir(dir.path()).unwrap_err();
        match err {
            StoreError::Malformed { file, .. } => assert_eq!(file, "operational_points.json"),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }
}
