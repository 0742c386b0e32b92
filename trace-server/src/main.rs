use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use trace_server::store::MemoryStore;
use trace_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let data_dir = std::env::var("TRACE_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let store = MemoryStore::from_dir(&data_dir)
        .unwrap_or_else(|e| panic!("failed to load rail data from {data_dir}: {e}"));

    let state = AppState::new(Arc::new(store));

    // Build the graph up front; on failure the server starts anyway and
    // retries lazily on first use.
    match state.graph.rebuild().await {
        Ok(graph) => info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "initial graph ready"
        ),
        Err(e) => error!(error = %e, "initial graph build failed, continuing degraded"),
    }

    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!(%addr, "trace server listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app).await.expect("server error");
}
