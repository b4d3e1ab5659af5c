pub mod check;
pub mod connections;
pub mod dump;
pub mod health;
pub mod meta;
pub mod restore;

use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use tower_http::timeout::TimeoutLayer;

use crate::state::AppState;

/// Build the full route tree.
///
/// ```text
/// POST   /db           create profile
/// PUT    /db           update profile (full replace)
/// GET    /db           list profiles
/// GET    /db/{id}      single profile
/// DELETE /db/{id}      delete profile
///
/// GET    /dump/{id}    stream a mongodump archive (attachment)
/// POST   /restore      multipart archive -> mongorestore
///
/// POST   /check        connectivity check, always a 200 payload
/// GET    /config       kiosk flag for the UI
/// GET    /version      build metadata
/// GET    /health       service + store health
/// ```
///
/// The request timeout wraps only the non-streaming routes: dumps and
/// restores run for as long as the archive takes to move.
pub fn api_routes(request_timeout: Duration) -> Router<AppState> {
    let timed = Router::new()
        .merge(connections::router())
        .merge(check::router())
        .merge(meta::router())
        .merge(health::router())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ));

    Router::new()
        .merge(timed)
        .merge(dump::router())
        .merge(restore::router())
}
