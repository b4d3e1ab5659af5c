//! Handlers for the `/db` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mongovault_core::error::CoreError;
use mongovault_core::profile::{validate_profile, DbConnection};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /db
///
/// Any caller-supplied id is ignored; the store assigns one.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<DbConnection>,
) -> AppResult<(StatusCode, Json<DbConnection>)> {
    validate_profile(&input)?;
    let created = state.store.create(&input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /db
///
/// Full replace of the record referenced by `input.id`.
pub async fn update(
    State(state): State<AppState>,
    Json(input): Json<DbConnection>,
) -> AppResult<Json<DbConnection>> {
    validate_profile(&input)?;
    let Some(id) = input.id.clone() else {
        return Err(AppError::Core(CoreError::Validation(
            "id is required for update".to_string(),
        )));
    };
    let updated = state
        .store
        .update(&id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Connection",
            id,
        }))?;
    Ok(Json(updated))
}

/// GET /db
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<DbConnection>>> {
    let profiles = state.store.list().await?;
    Ok(Json(profiles))
}

/// GET /db/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DbConnection>> {
    let profile = state
        .store
        .find_by_id(&id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Connection",
            id,
        }))?;
    Ok(Json(profile))
}

/// DELETE /db/{id}
///
/// Idempotent: deleting an id that is already absent succeeds silently.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let removed = state.store.delete(&id).await?;
    if !removed {
        tracing::debug!(%id, "delete for absent connection id");
    }
    Ok(StatusCode::OK)
}
