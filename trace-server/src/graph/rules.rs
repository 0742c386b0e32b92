//! Manual edge-weight overrides.
//!
//! The raw segment dataset contains known topology defects: segments whose
//! declared length contradicts the real-world distance, classic routes that
//! shortest-path search would wrongly prefer over their high-speed bypass,
//! and plausible-looking direct connections that do not exist. Rather than
//! scattering conditionals through the graph builder, the corrections live
//! here as an ordered list of (matcher, action) rules so the set is
//! independently testable and auditable against the real topology.

use crate::domain::NodeId;

/// What part of a segment a rule matches on.
#[derive(Debug, Clone, Copy)]
pub enum RuleMatch {
    /// The segment's dataset id is in the list.
    SegmentIds(&'static [i64]),

    /// Both endpoints are in the node set.
    BothIn(&'static [&'static str]),

    /// Either endpoint is in the node set.
    EitherIn(&'static [&'static str]),

    /// The endpoints are exactly this unordered pair.
    Pair(&'static str, &'static str),
}

/// What a rule does to a matching segment.
#[derive(Debug, Clone, Copy)]
pub enum RuleAction {
    /// Drop the segment entirely.
    Block,

    /// Multiply the segment's weight.
    Scale(f64),
}

/// One edge-override rule.
#[derive(Debug, Clone, Copy)]
pub struct EdgeRule {
    pub name: &'static str,
    pub matches: RuleMatch,
    pub action: RuleAction,
}

impl EdgeRule {
    /// Whether this rule applies to a segment.
    pub fn applies(&self, segment_id: i64, from: &NodeId, to: &NodeId) -> bool {
        match self.matches {
            RuleMatch::SegmentIds(ids) => ids.contains(&segment_id),
            RuleMatch::BothIn(nodes) => {
                nodes.contains(&from.as_str()) && nodes.contains(&to.as_str())
            }
            RuleMatch::EitherIn(nodes) => {
                nodes.contains(&from.as_str()) || nodes.contains(&to.as_str())
            }
            RuleMatch::Pair(a, b) => {
                (from.as_str() == a && to.as_str() == b) || (from.as_str() == b && to.as_str() == a)
            }
        }
    }
}

/// The default rule set, applied in order; a Block short-circuits.
///
/// - Segments 321/1249/1305/1310 claim absurdly short lengths for
///   long-distance hops (e.g. Leuven to Liège in 5 km) and break search.
/// - The FLV-ANS high-speed segment is slightly favored so it is chosen over
///   the penalized classic route of similar graph distance.
/// - The classic airport branch via Diegem/Zaventem is penalized so direct
///   trains route over the Diabolo link; stopping trains still reach it as
///   the only path to those nodes.
/// - The Spa branch is penalized so mainline Liège-Verviers trains do not
///   dip through Pepinster-Cité.
/// - FTNN-FLD appears in the dataset but is not a usable direct connection.
pub const DEFAULT_RULES: &[EdgeRule] = &[
    EdgeRule {
        name: "blocked corrupt segments",
        matches: RuleMatch::SegmentIds(&[321, 1249, 1305, 1310]),
        action: RuleAction::Block,
    },
    EdgeRule {
        name: "favor high-speed FLV-ANS",
        matches: RuleMatch::BothIn(&["FLV", "ANS"]),
        action: RuleAction::Scale(0.8),
    },
    EdgeRule {
        name: "penalize classic airport branch",
        matches: RuleMatch::EitherIn(&["FDG", "FZA"]),
        action: RuleAction::Scale(5.0),
    },
    EdgeRule {
        name: "avoid phantom FTNN-FLD link",
        matches: RuleMatch::Pair("FTNN", "FLD"),
        action: RuleAction::Scale(1000.0),
    },
    EdgeRule {
        name: "penalize Spa branch",
        matches: RuleMatch::EitherIn(&["FPSC", "FSS", "FSSG", "FJL", "FTX", "FRO"]),
        action: RuleAction::Scale(10.0),
    },
];

/// Run a weight through the rule set. Returns `None` when a rule blocks the
/// segment, otherwise the adjusted weight.
pub fn apply_rules(
    rules: &[EdgeRule],
    segment_id: i64,
    from: &NodeId,
    to: &NodeId,
    weight: f64,
) -> Option<f64> {
    let mut weight = weight;
    for rule in rules {
        if !rule.applies(segment_id, from, to) {
            continue;
        }
        match rule.action {
            RuleAction::Block => return None,
            RuleAction::Scale(factor) => weight *= factor,
        }
    }
    Some(weight)
}

/// A synthetic connector between nodes known to be physically adjacent but
/// missing from the raw segment dataset.
#[derive(Debug, Clone, Copy)]
pub struct VirtualEdge {
    pub from: &'static str,
    pub to: &'static str,
    pub weight: f64,
}

/// Default virtual edges: the Brussels Airport node (FBNL) is disconnected
/// in the raw data, so it is stitched to its real neighbors with low-weight
/// connectors.
pub const DEFAULT_VIRTUAL_EDGES: &[VirtualEdge] = &[
    VirtualEdge {
        from: "FBNL",
        to: "FM",
        weight: 0.1,
    },
    VirtualEdge {
        from: "FBNL",
        to: "FN",
        weight: 0.1,
    },
    VirtualEdge {
        from: "FBNL",
        to: "FLV",
        weight: 0.1,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn node(s: &str) -> NodeId {
        NodeId::parse(s).unwrap()
    }

    #[test]
    fn blocked_segment_ids_are_dropped() {
        for id in [321, 1249, 1305, 1310] {
            assert_eq!(
                apply_rules(DEFAULT_RULES, id, &node("FL"), &node("ANS"), 5.0),
                None
            );
        }
    }

    #[test]
    fn unmatched_segment_keeps_weight() {
        assert_eq!(
            apply_rules(DEFAULT_RULES, 1, &node("FLK"), &node("FSN"), 12.5),
            Some(12.5)
        );
    }

    #[test]
    fn high_speed_pair_is_favored() {
        assert_eq!(
            apply_rules(DEFAULT_RULES, 2, &node("FLV"), &node("ANS"), 66.0),
            Some(66.0 * 0.8)
        );
        // Reversed endpoints too
        assert_eq!(
            apply_rules(DEFAULT_RULES, 2, &node("ANS"), &node("FLV"), 66.0),
            Some(66.0 * 0.8)
        );
    }

    #[test]
    fn both_in_requires_both_endpoints() {
        // FLV on one end only: not the high-speed segment
        assert_eq!(
            apply_rules(DEFAULT_RULES, 3, &node("FLV"), &node("FLK"), 10.0),
            Some(10.0)
        );
    }

    #[test]
    fn airport_branch_penalized_on_either_endpoint() {
        assert_eq!(
            apply_rules(DEFAULT_RULES, 4, &node("FDG"), &node("FLK"), 2.0),
            Some(10.0)
        );
        assert_eq!(
            apply_rules(DEFAULT_RULES, 4, &node("FLK"), &node("FZA"), 2.0),
            Some(10.0)
        );
    }

    #[test]
    fn phantom_pair_is_effectively_unusable() {
        let w = apply_rules(DEFAULT_RULES, 5, &node("FTNN"), &node("FLD"), 3.0).unwrap();
        assert_eq!(w, 3000.0);
    }

    #[test]
    fn spa_branch_penalized() {
        let w = apply_rules(DEFAULT_RULES, 6, &node("FPSC"), &node("FPS"), 1.5).unwrap();
        assert_eq!(w, 15.0);
    }

    #[test]
    fn scales_compound_when_multiple_rules_match() {
        // A hypothetical segment touching both the airport set and the Spa
        // set picks up both multipliers.
        let w = apply_rules(DEFAULT_RULES, 7, &node("FDG"), &node("FRO"), 1.0).unwrap();
        assert!((w - 50.0).abs() < 1e-9);
    }

    #[test]
    fn virtual_edges_reference_valid_nodes() {
        for edge in DEFAULT_VIRTUAL_EDGES {
            assert!(NodeId::parse(edge.from).is_ok());
            assert!(NodeId::parse(edge.to).is_ok());
            assert!(edge.weight > 0.0);
        }
    }
}
