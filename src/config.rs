//! Configuration management for zapdash.
//!
//! Values come from environment variables and an optional `.env` file stored in the
//! local data directory. The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults
//!
//! None of the accessors panic. Settings with a sensible default fall back to it,
//! settings without one return `Option`.

use std::{env, path::PathBuf};

/// Port the invoicing backend listens on when no explicit URL is configured.
pub const DEFAULT_API_PORT: u16 = 8000;

/// Sync window used when `ZAPDASH_HISTORY_DAYS` is unset or invalid.
pub const DEFAULT_HISTORY_DAYS: u32 = 30;

/// Bind address of the local dashboard server.
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5173";

/// Returns the application's directory inside the local data directory.
///
/// - Linux: `~/.local/share/zapdash`
/// - macOS: `~/Library/Application Support/zapdash`
/// - Windows: `%LOCALAPPDATA%/zapdash`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("zapdash");
    path
}

/// Loads environment variables from `<data_dir>/.env`.
///
/// Creates the data directory when it does not exist yet. A missing `.env` file is
/// fine: everything can also be configured through the process environment.
/// Variables that are already set are not overridden.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the file exists
/// but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Returns the base URL of the invoicing backend.
///
/// Reads `ZAPDASH_API_URL`. When unset, the URL is derived from `ZAPDASH_API_HOST`
/// (default `localhost`) and [`DEFAULT_API_PORT`]. A trailing slash is removed so
/// endpoint paths can be appended directly.
///
/// # Example
///
/// ```
/// let url = api_url(); // e.g., "http://localhost:8000"
/// ```
pub fn api_url() -> String {
    let url = match non_empty_var("ZAPDASH_API_URL") {
        Some(url) => url,
        None => default_api_url(non_empty_var("ZAPDASH_API_HOST").as_deref()),
    };
    url.trim_end_matches('/').to_string()
}

/// Builds the fallback backend URL for the given host.
pub fn default_api_url(host: Option<&str>) -> String {
    format!(
        "http://{host}:{port}",
        host = host.unwrap_or("localhost"),
        port = DEFAULT_API_PORT
    )
}

/// Returns the default number of days of charging history to sync.
pub fn history_days() -> u32 {
    non_empty_var("ZAPDASH_HISTORY_DAYS")
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|days| *days > 0)
        .unwrap_or(DEFAULT_HISTORY_DAYS)
}

/// Returns the address the local dashboard server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    non_empty_var("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Returns the base URL of the hosted backend-as-a-service, if configured.
pub fn baas_url() -> Option<String> {
    non_empty_var("ZAPDASH_BAAS_URL").map(|url| url.trim_end_matches('/').to_string())
}

/// Returns the public (anon) key of the hosted backend-as-a-service.
///
/// # Security Note
///
/// Even though the key is public by design, it should not end up in logs.
pub fn baas_key() -> Option<String> {
    non_empty_var("ZAPDASH_BAAS_KEY")
}

/// Returns the database schema passed through the profile headers, if any.
pub fn baas_schema() -> Option<String> {
    non_empty_var("ZAPDASH_BAAS_SCHEMA")
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
