//! Web layer: HTTP transport over the trace engine.

mod dto;
mod routes;
mod state;

pub use dto::{
    AppError, DistanceResponse, ErrorResponse, PathQuery, PathResponse, RangeQuery, RebuildResponse,
    ResolveQuery, ResolveResponse,
};
pub use routes::create_router;
pub use state::AppState;
