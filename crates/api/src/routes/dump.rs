//! Route definition for the streaming dump endpoint.

use axum::routing::get;
use axum::Router;

use crate::handlers::dump;
use crate::state::AppState;

/// GET /dump/{id} -> streamed attachment.
pub fn router() -> Router<AppState> {
    Router::new().route("/dump/{id}", get(dump::dump))
}
