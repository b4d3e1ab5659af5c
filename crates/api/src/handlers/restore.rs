//! Ingesting an uploaded archive into the service's own backing store.

use axum::extract::{Multipart, State};
use axum::http::{header, HeaderMap, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use mongovault_core::error::CoreError;
use mongovault_core::tools::{restore_command, ToolProcess};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /restore
///
/// Pipes the uploaded `file` field into mongorestore's stdin. The target is
/// always the service's own backing store, never a user-supplied URL. On
/// success the browser is redirected back to the page it came from.
pub async fn restore(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> AppResult<Response> {
    if state.store.is_kiosk() {
        return Err(AppError::Core(CoreError::Forbidden(
            "restore is unavailable in kiosk mode".to_string(),
        )));
    }

    let _permit = state
        .transfer_permits
        .clone()
        .try_acquire_owned()
        .map_err(|_| AppError::Busy)?;

    let field = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(format!("invalid multipart upload: {err}")))?;
    let Some(mut field) = field else {
        return Err(AppError::BadRequest(
            "missing multipart field 'file'".to_string(),
        ));
    };
    if field.name() != Some("file") {
        return Err(AppError::BadRequest(
            "missing multipart field 'file'".to_string(),
        ));
    }

    let mut tool = ToolProcess::spawn(restore_command(
        &state.config.mongorestore_path,
        &state.config.mongodb_url,
    ))?;
    let mut stdin = tool
        .take_stdin()
        .ok_or_else(|| AppError::InternalError("restore stdin pipe missing".to_string()))?;

    tracing::info!("starting restore into backing store");

    // The stdin handle is scoped to this function and dropped on every exit
    // path; mongorestore only starts finalizing once it sees end-of-input.
    let copy_result: Result<(), AppError> = async {
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|err| AppError::BadRequest(format!("upload aborted: {err}")))?
        {
            stdin.write_all(&chunk).await.map_err(|err| {
                AppError::InternalError(format!("write to mongorestore failed: {err}"))
            })?;
        }
        stdin.flush().await.map_err(|err| {
            AppError::InternalError(format!("flush to mongorestore failed: {err}"))
        })?;
        Ok(())
    }
    .await;
    drop(stdin);

    if let Err(err) = copy_result {
        tool.kill().await;
        return Err(err);
    }

    tool.wait_checked().await?;
    tracing::info!("restore completed");

    Ok(Redirect::to(&referer_path(&headers)).into_response())
}

/// Where to send the browser after a successful restore: the path of the
/// referring page, or the UI root.
fn referer_path(headers: &HeaderMap) -> String {
    headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<Uri>().ok())
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| "/index.html".to_string())
}
