//! Data transfer objects for web requests and responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Query for identifier resolution.
#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    /// Schedule-feed stop identifier
    pub stop_id: String,

    /// Optional display name, used by override and fallback heuristics
    pub stop_name: Option<String>,
}

/// Resolution result.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    /// Canonical node id, absent when resolution failed
    pub node_id: Option<String>,
}

/// Result of a graph rebuild.
#[derive(Debug, Serialize)]
pub struct RebuildResponse {
    pub nodes: usize,
    pub edges: usize,
}

/// Query for a shortest-path search.
#[derive(Debug, Deserialize)]
pub struct PathQuery {
    pub from: String,
    pub to: String,
}

/// Shortest-path result: edge ids in display form, absent when no path.
#[derive(Debug, Serialize)]
pub struct PathResponse {
    pub edges: Option<Vec<String>>,
}

/// Optional stop range for trace and distance queries.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub from_stop: Option<String>,
    pub to_stop: Option<String>,
}

/// Journey distance result.
#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    pub distance_km: f64,
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<crate::graph::BuildError> for AppError {
    fn from(e: crate::graph::BuildError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        warn!(status = %status, message = %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
