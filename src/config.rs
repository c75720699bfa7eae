//! Configuration management for spotistat.
//!
//! Values come from the process environment, optionally seeded from `.env`
//! files. Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the local data directory (`spotistat/.env`)
//! 3. `.env` in the current working directory
//! 4. Built-in defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::error::ApiError;

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Loads `.env` files into the process environment.
///
/// The local data directory is created when missing so users have an obvious
/// place to drop their credentials:
/// - Linux: `~/.local/share/spotistat/.env`
/// - macOS: `~/Library/Application Support/spotistat/.env`
/// - Windows: `%LOCALAPPDATA%/spotistat/.env`
///
/// Neither file is required. Variables already present in the environment
/// are never overwritten.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    // a missing working-directory .env is the common case
    let _ = dotenv::dotenv();

    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotistat/.env");
    path
}

fn required(key: &str) -> Result<String, ApiError> {
    match env::var(key) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(ApiError::Config(format!("{key} must be set"))),
    }
}

fn or_default(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(val) if !val.is_empty() => val,
        _ => {
            tracing::debug!(var = key, default, "environment var undefined, defaulting");
            default.to_string()
        }
    }
}

/// Address the HTTP server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Client ID registered with Spotify (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String, ApiError> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Client secret registered with Spotify (`SPOTIFY_API_AUTH_CLIENT_SECRET`).
///
/// Never log this value.
pub fn spotify_client_secret() -> Result<String, ApiError> {
    required("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Base URL of the Web API (`SPOTIFY_API_URL`), without a trailing slash.
pub fn spotify_apiurl() -> String {
    or_default("SPOTIFY_API_URL", DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_string()
}

/// Client-credentials token endpoint (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Per-request timeout applied to every outbound call (`HTTP_TIMEOUT_SECS`).
pub fn http_timeout() -> Duration {
    let secs = env::var("HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
    Duration::from_secs(secs)
}
