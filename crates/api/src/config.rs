use std::path::PathBuf;

/// URL path under which the upload directory is served.
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Sub-directory (and URL segment) holding developer images.
pub const DEVELOPER_UPLOADS_DIR: &str = "developers";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `127.0.0.1`).
    pub host: String,
    /// Bind port (default: `5050`).
    pub port: u16,
    /// SQLite connection URL.
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Root directory of uploaded files, served at [`UPLOADS_ROUTE`].
    pub upload_dir: PathBuf,
    /// Request body limit for multipart upload endpoints.
    pub max_upload_bytes: usize,
    /// Insert starter content into empty tables at startup.
    pub seed_on_startup: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                        |
    /// |------------------------|------------------------------------------------|
    /// | `HOST`                 | `127.0.0.1`                                    |
    /// | `PORT`                 | `5050`                                         |
    /// | `DATABASE_URL`         | `sqlite://catfacts.db?mode=rwc`                |
    /// | `CORS_ORIGINS`         | `http://127.0.0.1:5173,http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                           |
    /// | `UPLOAD_DIR`           | `uploads`                                      |
    /// | `MAX_UPLOAD_BYTES`     | `10485760`                                     |
    /// | `SEED_ON_STARTUP`      | `false`                                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5050".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://catfacts.db?mode=rwc".into());

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://127.0.0.1:5173,http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upload_dir =
            PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()));

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| "10485760".into())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let seed_on_startup = std::env::var("SEED_ON_STARTUP")
            .map(|v| parse_flag(&v).expect("SEED_ON_STARTUP must be true or false"))
            .unwrap_or(false);

        Self {
            host,
            port,
            database_url,
            cors_origins,
            request_timeout_secs,
            upload_dir,
            max_upload_bytes,
            seed_on_startup,
        }
    }

    /// Directory holding developer images.
    pub fn developer_upload_dir(&self) -> PathBuf {
        self.upload_dir.join(DEVELOPER_UPLOADS_DIR)
    }

    /// Public URL prefix of developer image references.
    pub fn developer_upload_prefix() -> String {
        format!("{UPLOADS_ROUTE}/{DEVELOPER_UPLOADS_DIR}")
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
