//! Process-wide graph cache with atomic swap semantics.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::error;

use crate::store::RailStore;

use super::builder::{BuildError, build_graph};
use super::RailwayGraph;

/// Shared handle to the current railway graph.
///
/// The graph is rebuilt wholesale and swapped in atomically: readers either
/// see the previous complete graph or the new one, never a partially
/// populated structure. A failed rebuild keeps the last good graph. The lock
/// is coarse; rebuilds are triggered by data refresh, not per request.
#[derive(Clone)]
pub struct SharedGraph {
    inner: Arc<RwLock<Option<Arc<RailwayGraph>>>>,
    store: Arc<dyn RailStore>,
}

impl SharedGraph {
    /// Create an empty (unbuilt) shared graph over a store.
    pub fn new(store: Arc<dyn RailStore>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
            store,
        }
    }

    /// Rebuild the graph from the store and swap it in.
    ///
    /// On failure the previous graph is left untouched and the error is
    /// returned for the caller to report.
    pub async fn rebuild(&self) -> Result<Arc<RailwayGraph>, BuildError> {
        // Build outside the lock so readers are not blocked by the build.
        let graph = Arc::new(build_graph(self.store.as_ref())?);
        let mut guard = self.inner.write().await;
        *guard = Some(graph.clone());
        Ok(graph)
    }

    /// The current graph, if one has been built.
    pub async fn get(&self) -> Option<Arc<RailwayGraph>> {
        self.inner.read().await.clone()
    }

    /// The current graph, building it lazily if absent.
    ///
    /// A failed lazy build is logged and yields whatever was cached before
    /// (i.e. `None` on first use); callers treat that as "no path".
    pub async fn ensure(&self) -> Option<Arc<RailwayGraph>> {
        if let Some(graph) = self.get().await {
            return Some(graph);
        }
        match self.rebuild().await {
            Ok(graph) => Some(graph),
            Err(e) => {
                error!(error = %e, "graph build failed, keeping previous state");
                self.get().await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NodeId, OperationalPoint, Segment, Stop};
    use crate::store::{MemoryStoreBuilder, StoreError};

    fn node(s: &str) -> NodeId {
        NodeId::parse(s).unwrap()
    }

    /// A store whose bulk loads always fail, for exercising the
    /// keep-last-good path.
    struct FailingStore;

    impl RailStore for FailingStore {
        fn mapping(&self, _: &str) -> Option<NodeId> {
            None
        }
        fn mapping_containing(&self, _: &str) -> Option<NodeId> {
            None
        }
        fn alias_stop_id(&self, _: &str) -> Option<String> {
            None
        }
        fn operational_points(&self) -> Result<Vec<OperationalPoint>, StoreError> {
            Err(StoreError::Unavailable("test".into()))
        }
        fn point(&self, _: &NodeId) -> Option<OperationalPoint> {
            None
        }
        fn segments(&self) -> Result<Vec<Segment>, StoreError> {
            Err(StoreError::Unavailable("test".into()))
        }
        fn segment(&self, _: i64) -> Option<Segment> {
            None
        }
        fn train_stops(&self, _: &str) -> Vec<Stop> {
            Vec::new()
        }
    }

    /// Delegates to an inner store until `fail` is flipped.
    struct FlakyStore {
        inner: crate::store::MemoryStore,
        fail: std::sync::atomic::AtomicBool,
    }

    impl FlakyStore {
        fn failing(&self) -> bool {
            self.fail.load(std::sync::atomic::Ordering::SeqCst)
        }
    }

    impl RailStore for FlakyStore {
        fn mapping(&self, stop_id: &str) -> Option<NodeId> {
            self.inner.mapping(stop_id)
        }
        fn mapping_containing(&self, digits: &str) -> Option<NodeId> {
            self.inner.mapping_containing(digits)
        }
        fn alias_stop_id(&self, needle: &str) -> Option<String> {
            self.inner.alias_stop_id(needle)
        }
        fn operational_points(&self) -> Result<Vec<OperationalPoint>, StoreError> {
            if self.failing() {
                return Err(StoreError::Unavailable("flaky".into()));
            }
            self.inner.operational_points()
        }
        fn point(&self, id: &NodeId) -> Option<OperationalPoint> {
            self.inner.point(id)
        }
        fn segments(&self) -> Result<Vec<Segment>, StoreError> {
            if self.failing() {
                return Err(StoreError::Unavailable("flaky".into()));
            }
            self.inner.segments()
        }
        fn segment(&self, id: i64) -> Option<Segment> {
            self.inner.segment(id)
        }
        fn train_stops(&self, train_id: &str) -> Vec<Stop> {
            self.inner.train_stops(train_id)
        }
    }

    #[tokio::test]
    async fn failed_rebuild_keeps_last_good_graph() {
        let store = Arc::new(FlakyStore {
            inner: MemoryStoreBuilder::new()
                .segment(1, "FN", "FCV", Some(2.3), None)
                .build(),
            fail: std::sync::atomic::AtomicBool::new(false),
        });
        let shared = SharedGraph::new(store.clone());

        let good = shared.rebuild().await.unwrap();

        store.fail.store(true, std::sync::atomic::Ordering::SeqCst);
        assert!(shared.rebuild().await.is_err());

        // The previous graph is still served
        let current = shared.get().await.unwrap();
        assert!(Arc::ptr_eq(&good, &current));
        let ensured = shared.ensure().await.unwrap();
        assert!(Arc::ptr_eq(&good, &ensured));
    }

    #[tokio::test]
    async fn starts_unbuilt() {
        let shared = SharedGraph::new(Arc::new(MemoryStoreBuilder::new().build()));
        assert!(shared.get().await.is_none());
    }

    #[tokio::test]
    async fn ensure_builds_lazily() {
        let store = MemoryStoreBuilder::new()
            .segment(1, "FN", "FCV", Some(2.3), None)
            .build();
        let shared = SharedGraph::new(Arc::new(store));

        let graph = shared.ensure().await.unwrap();
        assert!(graph.contains(&node("FN")));

        // Second call returns the cached graph
        let again = shared.ensure().await.unwrap();
        assert!(Arc::ptr_eq(&graph, &again));
    }

    #[tokio::test]
    async fn rebuild_swaps_in_fresh_graph() {
        let store = MemoryStoreBuilder::new()
            .segment(1, "FN", "FCV", Some(2.3), None)
            .build();
        let shared = SharedGraph::new(Arc::new(store));

        let first = shared.rebuild().await.unwrap();
        let second = shared.rebuild().await.unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }

    #[tokio::test]
    async fn failed_build_reports_error_and_leaves_no_graph() {
        let shared = SharedGraph::new(Arc::new(FailingStore));
        assert!(shared.rebuild().await.is_err());
        assert!(shared.get().await.is_none());
        assert!(shared.ensure().await.is_none());
    }
}
