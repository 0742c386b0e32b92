//! Domain types for the railway trace engine.
//!
//! This module contains the core domain model types that represent validated
//! rail data. All types enforce their invariants at construction time, so
//! code that receives these types can trust their validity.

mod node;
mod point;
mod segment;
mod stop;

pub use node::{InvalidNodeId, NodeId};
pub use point::OperationalPoint;
pub use segment::{EdgeId, Segment};
pub use stop::Stop;
