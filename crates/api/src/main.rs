use std::net::SocketAddr;
use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mongovault_api::build_info::BUILD_INFO;
use mongovault_api::config::AppConfig;
use mongovault_api::{routes, state::AppState};
use mongovault_db::ProfileStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mongovault_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        commit_hash = BUILD_INFO.commit_hash,
        version = BUILD_INFO.version,
        "mongovault starting"
    );

    // --- Configuration ---
    let config = AppConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        kiosk = config.kiosk_mode,
        "Loaded server configuration"
    );

    // --- Profile store (live MongoDB or static kiosk list) ---
    let store = if config.kiosk_mode {
        tracing::info!(
            profiles = config.kiosk_profiles.len(),
            "Kiosk mode: serving the static profile list, mutations disabled"
        );
        ProfileStore::kiosk(config.kiosk_profiles.clone())
    } else {
        let client = mongovault_db::connect(&config.mongodb_url, config.server_selection_timeout)
            .await
            .expect("Failed to configure MongoDB client");
        let db = mongovault_db::default_database(&client);
        mongovault_db::ping(&db)
            .await
            .expect("Backing store ping failed");
        tracing::info!("Backing store reachable");

        mongovault_db::ensure_indexes(&db)
            .await
            .expect("Failed to create the unique index on connection name");
        tracing::info!("Ensured unique index on connection name");

        ProfileStore::live(db)
    };

    // --- CORS ---
    let cors = build_cors_layer(&config);

    // --- Request ID header name ---
    let request_id_header = HeaderName::from_static("x-request-id");

    let static_dir = config.static_dir.clone();
    let request_timeout = Duration::from_secs(config.request_timeout_secs);
    let host = config.host.clone();
    let port = config.port;

    // --- App state ---
    let state = AppState::new(store, config);

    // --- Router ---
    let mut app = axum::Router::new()
        .merge(routes::api_routes(request_timeout))
        // -- Middleware stack (applied bottom-up) --
        // Panic recovery: catch panics and return 500.
        .layer(CatchPanicLayer::new())
        // Propagate request ID to response.
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        // Structured request/response tracing.
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Set request ID on incoming requests.
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        // CORS.
        .layer(cors)
        // Shared state.
        .with_state(state);

    // Serve the compiled UI when a build directory is configured.
    if let Some(dir) = static_dir {
        tracing::info!(dir = %dir.display(), "Serving static assets");
        app = app.fallback_service(ServeDir::new(dir));
    }

    // --- Start server ---
    let addr = SocketAddr::new(host.parse().expect("Invalid HOST address"), port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Build the CORS middleware layer from server configuration.
///
/// Panics at startup if any configured origin is invalid, which is the
/// desired behaviour -- we want misconfiguration to fail fast.
fn build_cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse()
                .unwrap_or_else(|err| panic!("Invalid CORS origin '{origin}': {err}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}
