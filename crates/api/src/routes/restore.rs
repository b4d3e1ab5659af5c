//! Route definition for the restore upload endpoint.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::restore;
use crate::state::AppState;

/// POST /restore -> multipart archive upload.
///
/// The body limit is lifted: archives can be arbitrarily large and are
/// streamed straight into the subprocess, never buffered.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restore", post(restore::restore))
        .layer(DefaultBodyLimit::disable())
}
