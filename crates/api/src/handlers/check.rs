//! Connectivity checks for stored or ad-hoc connection strings.

use std::time::Duration;

use axum::extract::State;
use axum::Json;
use mongodb::options::ClientOptions;
use mongodb::Client;
use mongovault_core::profile::{CheckRequest, CheckResponse};

use crate::state::AppState;

/// POST /check
///
/// Diagnoses a connection string without ever surfacing an HTTP error:
/// every failure (parse, auth, network, timeout) comes back as
/// `{ok:false, message}` so users can debug their input safely.
pub async fn check(
    State(state): State<AppState>,
    Json(request): Json<CheckRequest>,
) -> Json<CheckResponse> {
    let url = match resolve_target(&state, &request).await {
        Ok(url) => url,
        Err(message) => return Json(CheckResponse::failed(message)),
    };

    match probe(&url, state.config.server_selection_timeout).await {
        Ok(databases) => {
            tracing::debug!(count = databases.len(), "check listed databases");
            Json(CheckResponse::ok())
        }
        Err(err) => {
            tracing::info!(error = %err, "check failed");
            Json(CheckResponse::failed(err.to_string()))
        }
    }
}

/// A profile id takes precedence over a raw connection string. Lookup
/// failures are messages, not HTTP errors.
async fn resolve_target(state: &AppState, request: &CheckRequest) -> Result<String, String> {
    if let Some(id) = &request.id {
        return match state.store.find_by_id_unredacted(id).await {
            Ok(Some(profile)) => Ok(profile.connection_url),
            Ok(None) => Err(format!("connection with id '{id}' not found")),
            Err(err) => Err(err.to_string()),
        };
    }
    match &request.connection_url {
        Some(url) if !url.trim().is_empty() => Ok(url.clone()),
        _ => Err("either 'id' or 'connectionUrl' must be provided".to_string()),
    }
}

/// Cheapest reachability proof: list database names, then shut the client
/// down. Never mutates the target. The server-selection timeout bounds how
/// long an unreachable host can stall the request.
async fn probe(url: &str, timeout: Duration) -> Result<Vec<String>, mongodb::error::Error> {
    let mut options = ClientOptions::parse(url).await?;
    options.server_selection_timeout = Some(timeout);
    let client = Client::with_options(options)?;
    let result = client.list_database_names().await;
    client.shutdown().await;
    result
}
