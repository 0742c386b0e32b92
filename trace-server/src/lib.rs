//! Railway trace server.
//!
//! Reconciles a schedule network (transit-feed stop identifiers) with the
//! physical rail infrastructure (operational points and track segments),
//! and answers: "which tracks does this train actually run over, and how
//! far is that?"

pub mod domain;
pub mod graph;
pub mod path;
pub mod resolver;
pub mod store;
pub mod trace;
pub mod web;
