//! Identifier resolution: schedule stop ids to infrastructure nodes.
//!
//! The schedule feed and the infrastructure dataset identify stations
//! independently, and the persisted station mappings do not cover every stop.
//! Resolution therefore runs a chain of heuristics, first match wins:
//! curated name overrides, direct mapping lookup, letter-prefix
//! normalization, numeric-substring match, and finally a one-hop alias
//! fallback by name.

mod overrides;

pub use overrides::{NAME_OVERRIDES, NameOverride, curated_override};

use std::sync::Arc;

use crate::domain::NodeId;
use crate::store::RailStore;

/// Minimum digit-run length for the numeric-substring heuristic. Shorter
/// runs match too promiscuously to be trusted.
const MIN_DIGIT_RUN: usize = 5;

/// Resolves schedule-stop identifiers to canonical infrastructure nodes.
///
/// Lookups are read-only and side-effect free; concurrent use needs no
/// coordination.
#[derive(Clone)]
pub struct Resolver {
    store: Arc<dyn RailStore>,
}

impl Resolver {
    pub fn new(store: Arc<dyn RailStore>) -> Self {
        Self { store }
    }

    /// Resolve a stop id (plus optional display name) to a node id.
    ///
    /// Returns `None` when no heuristic produces a mapping; callers that
    /// tolerate partial coverage skip such stops.
    pub fn resolve(&self, stop_id: &str, stop_name: Option<&str>) -> Option<NodeId> {
        if stop_id.is_empty() {
            return None;
        }

        // Curated corrections take precedence over whatever the mapping
        // store says; they exist because the store is wrong for these hubs.
        if let Some(name) = stop_name {
            if let Some(node) = curated_override(name) {
                return Some(node);
            }
        }

        // The name fallback swaps in the alias's stop id for one extra pass,
        // never more, so termination is structural.
        let mut candidate = stop_id.to_owned();
        for pass in 0..2 {
            if let Some(node) = self.lookup_by_id(&candidate) {
                return Some(node);
            }
            if pass == 1 {
                break;
            }
            let Some(name) = stop_name else { break };
            match self.store.alias_stop_id(&normalize_name(name)) {
                Some(alt) if alt != candidate => candidate = alt,
                _ => break,
            }
        }

        None
    }

    /// Id-based lookups: direct, prefix-normalized, then numeric substring.
    fn lookup_by_id(&self, stop_id: &str) -> Option<NodeId> {
        if let Some(node) = self.store.mapping(stop_id) {
            return Some(node);
        }

        // The feed sometimes prefixes numeric ids with a single letter 'S';
        // strip it or add it and retry.
        let alt = match stop_id.strip_prefix('S') {
            Some(rest) => rest.to_owned(),
            None => format!("S{stop_id}"),
        };
        if let Some(node) = self.store.mapping(&alt) {
            return Some(node);
        }

        let digits: String = stop_id.chars().filter(char::is_ascii_digit).collect();
        if digits.len() >= MIN_DIGIT_RUN {
            if let Some(node) = self.store.mapping_containing(&digits) {
                return Some(node);
            }
        }

        None
    }
}

/// Normalize a display name for alias search: lowercase, separators to spaces.
fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace(['-', '/'], " ")
}
