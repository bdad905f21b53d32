use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local use. Override via
/// environment variables (or a `.env` file).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`; the `--port` CLI flag wins).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Days a page may go unread before the sweep deletes it (default: `60`).
    pub retention_days: i64,
    /// Seconds between expiry sweeps (default: `86400`, i.e. daily).
    pub sweep_interval_secs: u64,
    /// Directory served under `/static` (default: `static`).
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default  |
    /// |------------------------|----------|
    /// | `HOST`                 | `0.0.0.0`|
    /// | `PORT`                 | `8000`   |
    /// | `REQUEST_TIMEOUT_SECS` | `30`     |
    /// | `PAGE_RETENTION_DAYS`  | `60`     |
    /// | `SWEEP_INTERVAL_SECS`  | `86400`  |
    /// | `STATIC_DIR`           | `static` |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let retention_days: i64 = std::env::var("PAGE_RETENTION_DAYS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("PAGE_RETENTION_DAYS must be a valid i64");

        let sweep_interval_secs: u64 = std::env::var("SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "86400".into())
            .parse()
            .expect("SWEEP_INTERVAL_SECS must be a valid u64");

        let static_dir = PathBuf::from(std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into()));

        Self {
            host,
            port,
            request_timeout_secs,
            retention_days,
            sweep_interval_secs,
            static_dir,
        }
    }
}
