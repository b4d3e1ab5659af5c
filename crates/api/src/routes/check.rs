//! Route definition for the connectivity check endpoint.

use axum::routing::post;
use axum::Router;

use crate::handlers::check;
use crate::state::AppState;

/// POST /check -> `{ok, message}`.
pub fn router() -> Router<AppState> {
    Router::new().route("/check", post(check::check))
}
