//! Application state for the web layer.

use std::sync::Arc;

use crate::graph::SharedGraph;
use crate::resolver::Resolver;
use crate::store::RailStore;
use crate::trace::TraceAssembler;

/// Shared application state.
///
/// Contains the engine components needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Resolver for schedule stop identifiers
    pub resolver: Resolver,

    /// Shared railway graph cache
    pub graph: SharedGraph,

    /// Trace and distance assembler
    pub trace: TraceAssembler,
}

impl AppState {
    /// Create app state over a data store.
    pub fn new(store: Arc<dyn RailStore>) -> Self {
        let resolver = Resolver::new(store.clone());
        let graph = SharedGraph::new(store.clone());
        let trace = TraceAssembler::new(store, graph.clone(), resolver.clone());

        Self {
            resolver,
            graph,
            trace,
        }
    }
}
