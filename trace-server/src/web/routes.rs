//! HTTP route handlers.
//!
//! A thin transport wrapper over the engine's boundary operations. "No
//! path" and "unresolvable identifier" are representable outcomes, not
//! server errors.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};

use crate::domain::NodeId;
use crate::path::shortest_path;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/resolve", get(resolve_stop))
        .route("/api/graph/rebuild", post(rebuild_graph))
        .route("/api/path", get(find_path))
        .route("/api/trace/:train_id", get(trace_geometry))
        .route("/api/distance/:train_id", get(journey_distance))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Resolve a schedule stop identifier to a canonical node.
async fn resolve_stop(
    State(state): State<AppState>,
    Query(req): Query<ResolveQuery>,
) -> Json<ResolveResponse> {
    let node = state
        .resolver
        .resolve(&req.stop_id, req.stop_name.as_deref());
    Json(ResolveResponse {
        node_id: node.map(|n| n.to_string()),
    })
}

/// Rebuild the railway graph and swap it in.
async fn rebuild_graph(State(state): State<AppState>) -> Result<Json<RebuildResponse>, AppError> {
    let graph = state.graph.rebuild().await?;
    Ok(Json(RebuildResponse {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
    }))
}

/// Shortest path between two canonical nodes.
async fn find_path(
    State(state): State<AppState>,
    Query(req): Query<PathQuery>,
) -> Result<Json<PathResponse>, AppError> {
    let from = NodeId::parse(&req.from).map_err(|e| AppError::BadRequest {
        message: format!("invalid 'from' node: {e}"),
    })?;
    let to = NodeId::parse(&req.to).map_err(|e| AppError::BadRequest {
        message: format!("invalid 'to' node: {e}"),
    })?;

    let edges = match state.graph.ensure().await {
        Some(graph) => shortest_path(&graph, &from, &to)
            .map(|path| path.iter().map(ToString::to_string).collect()),
        None => None,
    };

    Ok(Json(PathResponse { edges }))
}

/// Physical trace of a train over an optional stop range, as GeoJSON.
async fn trace_geometry(
    State(state): State<AppState>,
    Path(train_id): Path<String>,
    Query(range): Query<RangeQuery>,
) -> Result<Json<geojson::FeatureCollection>, AppError> {
    let trace = state
        .trace
        .trace_geometry(
            &train_id,
            range.from_stop.as_deref(),
            range.to_stop.as_deref(),
        )
        .await;

    match trace {
        Some(fc) => Ok(Json(fc)),
        None => Err(AppError::NotFound {
            message: format!("no trace data for train {train_id}"),
        }),
    }
}

/// Journey distance of a train over an optional stop range.
async fn journey_distance(
    State(state): State<AppState>,
    Path(train_id): Path<String>,
    Query(range): Query<RangeQuery>,
) -> Json<DistanceResponse> {
    let distance_km = state
        .trace
        .journey_distance(
            &train_id,
            range.from_stop.as_deref(),
            range.to_stop.as_deref(),
        )
        .await;
    Json(DistanceResponse { distance_km })
}
