//! Streaming dump of a profile's database as an HTTP attachment.

use std::io;

use axum::body::{Body, Bytes};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use futures::future;
use futures::stream::{self, StreamExt};
use mongovault_core::error::CoreError;
use mongovault_core::tools::{dump_command, ToolError, ToolProcess};
use tokio_util::io::ReaderStream;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /dump/{id}
///
/// The profile is resolved with its real connection URL (never redacted)
/// before any header is written, so an unknown id is still a clean 404.
/// After the headers are committed, failures can only be signalled through
/// the body: a non-zero mongodump exit logs the captured stderr and errors
/// the stream, so the client sees an aborted transfer instead of a silently
/// corrupt archive.
pub async fn dump(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Response> {
    let profile = state
        .store
        .find_by_id_unredacted(&id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Connection",
            id,
        }))?;

    let permit = state
        .transfer_permits
        .clone()
        .try_acquire_owned()
        .map_err(|_| AppError::Busy)?;

    let mut tool = ToolProcess::spawn(dump_command(
        &state.config.mongodump_path,
        &profile.connection_url,
    ))?;
    let stdout = tool
        .take_stdout()
        .ok_or_else(|| AppError::InternalError("dump stdout pipe missing".to_string()))?;

    tracing::info!(name = %profile.name, "starting dump");

    // The tail owns the child and the admission permit: dropping the stream
    // mid-transfer (client disconnect) kills the subprocess and releases
    // the permit.
    let name = profile.name.clone();
    let tail = stream::once(async move {
        let _permit = permit;
        tool.wait_checked().await
    })
    .filter_map(move |result| {
        let mapped: Option<Result<Bytes, io::Error>> = match result {
            Ok(()) => None,
            Err(ToolError::Failed { exit_code, stderr }) => {
                tracing::error!(name = %name, ?exit_code, stderr = %stderr, "mongodump failed");
                Some(Err(io::Error::other(format!(
                    "mongodump exited with code {exit_code:?}: {stderr}"
                ))))
            }
            Err(err) => {
                tracing::error!(name = %name, error = %err, "dump stream failed");
                Some(Err(io::Error::other(err.to_string())))
            }
        };
        future::ready(mapped)
    });

    let body = Body::from_stream(ReaderStream::new(stdout).chain(tail));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            attachment_disposition(&profile.name),
        )
        .body(body)
        .map_err(|err| AppError::InternalError(err.to_string()))
}

/// `attachment` disposition with an RFC 5987 `filename*`, tolerating spaces
/// and non-ASCII profile names.
fn attachment_disposition(name: &str) -> String {
    format!("attachment; filename*=utf-8''{}.gz", urlencoding::encode(name))
}

#[cfg(test)]
mod tests {
    use super::attachment_disposition;

    #[test]
    fn disposition_encodes_spaces() {
        assert_eq!(
            attachment_disposition("alpha prod"),
            "attachment; filename*=utf-8''alpha%20prod.gz"
        );
    }

    #[test]
    fn disposition_encodes_non_ascii() {
        assert_eq!(
            attachment_disposition("béta"),
            "attachment; filename*=utf-8''b%C3%A9ta.gz"
        );
    }

    #[test]
    fn disposition_keeps_plain_names() {
        assert_eq!(
            attachment_disposition("prod"),
            "attachment; filename*=utf-8''prod.gz"
        );
    }
}
