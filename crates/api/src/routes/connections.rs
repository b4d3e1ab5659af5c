//! Route definitions for the `/db` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::connection;
use crate::state::AppState;

/// ```text
/// POST   /db       -> create
/// PUT    /db       -> update
/// GET    /db       -> list
/// GET    /db/{id}  -> get_by_id
/// DELETE /db/{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/db",
            post(connection::create)
                .put(connection::update)
                .get(connection::list),
        )
        .route(
            "/db/{id}",
            get(connection::get_by_id).delete(connection::delete),
        )
}
