//! Shared harness for API integration tests.
//!
//! Everything runs against the in-process router with the same middleware
//! stack `main` uses. No live MongoDB is required: the kiosk store stands
//! in for read paths, a lazily-connecting live store for restore, and the
//! dump/restore tools are stub shell scripts.

#![allow(dead_code)]

use std::io::Write as _;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use mongovault_api::config::AppConfig;
use mongovault_api::routes;
use mongovault_api::state::AppState;
use mongovault_db::{KioskProfile, ProfileStore};

/// Boundary used by [`multipart_body`].
pub const MULTIPART_BOUNDARY: &str = "mongovault-test-boundary";

/// Build a test `AppConfig` with safe defaults and the kiosk fixtures.
pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        mongodb_url: "mongodb://127.0.0.1:27017/mongovault-test".to_string(),
        mongodump_path: "mongodump".to_string(),
        mongorestore_path: "mongorestore".to_string(),
        server_selection_timeout: Duration::from_millis(250),
        kiosk_mode: true,
        kiosk_profiles: kiosk_profiles(),
        max_concurrent_transfers: 2,
        static_dir: None,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
    }
}

/// Two kiosk profiles: one with a space in the name, one non-ASCII, so the
/// attachment filename encoding gets exercised.
pub fn kiosk_profiles() -> Vec<KioskProfile> {
    vec![
        KioskProfile {
            name: "alpha prod".to_string(),
            connection_url: "mongodb://alpha/db".to_string(),
        },
        KioskProfile {
            name: "béta".to_string(),
            connection_url: "mongodb://beta/db".to_string(),
        },
    ]
}

/// Kiosk-store app from the given config.
pub fn build_test_app(config: AppConfig) -> Router {
    let store = ProfileStore::kiosk(config.kiosk_profiles.clone());
    build_test_app_with_store(store, config)
}

/// Live-store app whose MongoDB client connects lazily: fine for routes
/// that never touch the store (e.g. `/restore` with stub tools).
pub async fn build_live_test_app(config: AppConfig) -> Router {
    let client = mongovault_db::connect(&config.mongodb_url, config.server_selection_timeout)
        .await
        .expect("client options should parse");
    let store = ProfileStore::live(mongovault_db::default_database(&client));
    build_test_app_with_store(store, config)
}

/// Build the full application router with the given store.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, tracing, panic
/// recovery, per-group timeout) that production uses.
pub fn build_test_app_with_store(store: ProfileStore, config: AppConfig) -> Router {
    let request_timeout = Duration::from_secs(config.request_timeout_secs);
    let state = AppState::new(store, config);

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::api_routes(request_timeout))
        .layer(CatchPanicLayer::new())
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(CorsLayer::new())
        .with_state(state)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::PUT, uri, body).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect the response body as raw bytes; `Err` when the stream aborts.
pub async fn try_body_bytes(response: Response<Body>) -> Result<Vec<u8>, axum::Error> {
    response
        .into_body()
        .collect()
        .await
        .map(|collected| collected.to_bytes().to_vec())
}

/// Scratch directory for stub tools, placed under the target dir so the
/// scripts stay executable even when the system tmpdir is mounted noexec.
pub fn tool_dir() -> tempfile::TempDir {
    tempfile::TempDir::new_in(env!("CARGO_TARGET_TMPDIR")).unwrap()
}

/// Write an executable stub tool script into `dir` and return its path.
pub fn write_stub_tool(dir: &Path, name: &str, script: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(script.as_bytes()).unwrap();
    let mut perms = file.metadata().unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

/// A single-field `multipart/form-data` body carrying `payload` under the
/// field name `file`.
pub fn multipart_body(payload: &[u8]) -> Vec<u8> {
    multipart_body_with_field("file", payload)
}

pub fn multipart_body_with_field(field: &str, payload: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"backup.gz\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

/// POST a multipart body to `/restore`, optionally with a `Referer`.
pub async fn post_restore(app: Router, payload: Vec<u8>, referer: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/restore")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        );
    if let Some(referer) = referer {
        builder = builder.header("referer", referer);
    }
    app.oneshot(builder.body(Body::from(payload)).unwrap())
        .await
        .unwrap()
}
