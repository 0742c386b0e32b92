//! Curated station-name overrides.
//!
//! Automatic coordinate matching produced wrong or missing mappings for a
//! handful of hubs, so those are pinned here by name fragment. The table is
//! ordered configuration data: entries are checked top to bottom and the
//! first hit wins, so new corrections can be appended without touching the
//! resolution algorithm.

use crate::domain::NodeId;

/// One curated correction: a lowercase name fragment pinned to a node.
#[derive(Debug, Clone, Copy)]
pub struct NameOverride {
    /// Lowercase fragment that must appear in the stop name.
    pub fragment: &'static str,

    /// Lowercase fragment that must NOT appear, for disambiguation.
    pub unless: Option<&'static str>,

    /// The canonical node this name maps to.
    pub node: &'static str,
}

/// The curated override table.
///
/// "leuven" is pinned to FLV (the high-speed-line node) because the plain FL
/// mapping is broken in the segment dataset; "pepinster" must not capture
/// Pepinster-Cité, which is a different node on the Spa branch.
pub const NAME_OVERRIDES: &[NameOverride] = &[
    NameOverride {
        fragment: "lokeren",
        unless: None,
        node: "FLK",
    },
    NameOverride {
        fragment: "zwijndrecht",
        unless: None,
        node: "FZW",
    },
    NameOverride {
        fragment: "bevers",
        unless: None,
        node: "FBV",
    },
    NameOverride {
        fragment: "antwerpen-centraal",
        unless: None,
        node: "FN",
    },
    NameOverride {
        fragment: "berchem",
        unless: None,
        node: "FCV",
    },
    NameOverride {
        fragment: "sint-niklaas",
        unless: None,
        node: "FSN",
    },
    NameOverride {
        fragment: "gent-sint-pieters",
        unless: None,
        node: "FGSP",
    },
    NameOverride {
        fragment: "gent-dampoort",
        unless: None,
        node: "FGDM",
    },
    NameOverride {
        fragment: "gentbrugge",
        unless: None,
        node: "FUGE",
    },
    NameOverride {
        fragment: "leuven",
        unless: Some("heverlee"),
        node: "FLV",
    },
    NameOverride {
        fragment: "pepinster",
        unless: Some("cit"),
        node: "FPS",
    },
];

/// Look up a curated override for a stop name. First matching entry wins.
pub fn curated_override(stop_name: &str) -> Option<NodeId> {
    let lname = stop_name.to_lowercase();
    NAME_OVERRIDES
        .iter()
        .find(|o| {
            lname.contains(o.fragment) && o.unless.is_none_or(|excluded| !lname.contains(excluded))
        })
        .and_then(|o| NodeId::parse(o.node).ok())
}
