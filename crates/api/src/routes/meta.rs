//! Read-only metadata endpoints consumed by the UI shell.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::build_info::{BuildInfo, BUILD_INFO};
use crate::state::AppState;

/// Payload of `GET /config`: which operating mode the UI should render.
/// In kiosk mode the UI hides the destructive controls.
#[derive(Serialize)]
pub struct ConfigResponse {
    pub kiosk: bool,
}

/// GET /config
async fn config_flags(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        kiosk: state.store.is_kiosk(),
    })
}

/// GET /version -- build metadata fixed at compile time.
async fn version() -> Json<BuildInfo> {
    Json(BUILD_INFO)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/config", get(config_flags))
        .route("/version", get(version))
}
