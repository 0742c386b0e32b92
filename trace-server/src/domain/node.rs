//! Infrastructure node identifiers.

use std::fmt;

/// Error returned when parsing an invalid node identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid node id: {reason}")]
pub struct InvalidNodeId {
    reason: &'static str,
}

/// Maximum length of a node identifier.
const MAX_LEN: usize = 12;

/// A canonical infrastructure node identifier.
///
/// These are the symbolic identifiers of operational points in the physical
/// rail network (e.g. `FN`, `FGSP`, `ANS`), distinct from schedule-feed stop
/// identifiers. Always non-empty uppercase ASCII letters or digits; this type
/// guarantees validity by construction.
///
/// # Examples
///
/// ```
/// use trace_server::domain::NodeId;
///
/// let fn_node = NodeId::parse("FN").unwrap();
/// assert_eq!(fn_node.as_str(), "FN");
///
/// // Lowercase is rejected
/// assert!(NodeId::parse("fn").is_err());
///
/// // Empty is rejected
/// assert!(NodeId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    /// Parse a node identifier from a string.
    ///
    /// The input must be 1 to 12 uppercase ASCII letters or digits.
    pub fn parse(s: &str) -> Result<Self, InvalidNodeId> {
        if s.is_empty() {
            return Err(InvalidNodeId {
                reason: "must not be empty",
            });
        }

        if s.len() > MAX_LEN {
            return Err(InvalidNodeId {
                reason: "too long (max 12 characters)",
            });
        }

        for b in s.bytes() {
            if !b.is_ascii_uppercase() && !b.is_ascii_digit() {
                return Err(InvalidNodeId {
                    reason: "must be uppercase ASCII letters or digits",
                });
            }
        }

        Ok(NodeId(s.to_owned()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
