use std::path::PathBuf;
use std::time::Duration;

use mongovault_db::KioskProfile;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// The service's own backing store; also the target of `/restore`.
    pub mongodb_url: String,
    /// Path to the mongodump executable.
    pub mongodump_path: String,
    /// Path to the mongorestore executable.
    pub mongorestore_path: String,
    /// Driver server-selection timeout, bounding how long an unreachable
    /// host can stall a request.
    pub server_selection_timeout: Duration,
    /// Serve the static kiosk list instead of the live store.
    pub kiosk_mode: bool,
    /// Kiosk-mode profiles, parsed from a JSON array.
    pub kiosk_profiles: Vec<KioskProfile>,
    /// Admission limit on concurrent dump/restore subprocesses.
    pub max_concurrent_transfers: usize,
    /// Optional directory with the compiled UI, served as a fallback.
    pub static_dir: Option<PathBuf>,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds for non-streaming routes.
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                                  |
    /// |-------------------------------|------------------------------------------|
    /// | `HOST`                        | `0.0.0.0`                                |
    /// | `PORT`                        | `8080`                                   |
    /// | `MONGODB_URL`                 | `mongodb://127.0.0.1:27017/mongovault`   |
    /// | `MONGODUMP_PATH`              | `mongodump`                              |
    /// | `MONGORESTORE_PATH`           | `mongorestore`                           |
    /// | `SERVER_SELECTION_TIMEOUT_MS` | `3000`                                   |
    /// | `KIOSK_MODE`                  | `false`                                  |
    /// | `KIOSK_PROFILES`              | `[]`                                     |
    /// | `MAX_CONCURRENT_TRANSFERS`    | `2`                                      |
    /// | `STATIC_DIR`                  | unset                                    |
    /// | `CORS_ORIGINS`                | `http://localhost:3000`                  |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let mongodb_url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://127.0.0.1:27017/mongovault".into());

        let mongodump_path =
            std::env::var("MONGODUMP_PATH").unwrap_or_else(|_| "mongodump".into());

        let mongorestore_path =
            std::env::var("MONGORESTORE_PATH").unwrap_or_else(|_| "mongorestore".into());

        let server_selection_timeout_ms: u64 = std::env::var("SERVER_SELECTION_TIMEOUT_MS")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("SERVER_SELECTION_TIMEOUT_MS must be a valid u64");

        let kiosk_mode = std::env::var("KIOSK_MODE")
            .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "True"))
            .unwrap_or(false);

        let kiosk_profiles: Vec<KioskProfile> = std::env::var("KIOSK_PROFILES")
            .map(|raw| {
                serde_json::from_str(&raw)
                    .expect("KIOSK_PROFILES must be a JSON array of {name, connectionUrl}")
            })
            .unwrap_or_default();

        let max_concurrent_transfers: usize = std::env::var("MAX_CONCURRENT_TRANSFERS")
            .unwrap_or_else(|_| "2".into())
            .parse()
            .expect("MAX_CONCURRENT_TRANSFERS must be a valid usize");

        let static_dir = std::env::var("STATIC_DIR").ok().map(PathBuf::from);

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            mongodb_url,
            mongodump_path,
            mongorestore_path,
            server_selection_timeout: Duration::from_millis(server_selection_timeout_ms),
            kiosk_mode,
            kiosk_profiles,
            max_concurrent_transfers,
            static_dir,
            cors_origins,
            request_timeout_secs,
        }
    }
}
