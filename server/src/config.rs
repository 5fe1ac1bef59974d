//! Configuration for the DailyCards server
//!
//! Every setting is read from a `DAILYCARDS_*` environment variable with a
//! compile-time default. Command-line flags, when given, take precedence over
//! the environment (see `main.rs`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::auth::SessionSettings;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATA_DIR: &str = ".local/share/dailycards";
const DEV_DATA_DIR: &str = "./data";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:8080";
const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;
/// Ten years. Longer lifetimes overflow cookie and timestamp arithmetic.
pub const MAX_SESSION_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;
const DATABASE_FILE: &str = "dailycards.db";

/// Resolved server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
    pub data_dir: PathBuf,
    pub allowed_origins: Vec<String>,
    pub static_dir: Option<PathBuf>,
    pub sessions: SessionSettings,
    pub log_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            addr: get_addr(),
            data_dir: get_data_dir(),
            allowed_origins: get_allowed_origins(),
            static_dir: get_static_dir(),
            sessions: SessionSettings {
                ttl: get_session_ttl(),
                secure: get_secure_cookies(),
            },
            log_dir: get_log_dir(),
        }
    }

    pub fn database_path(&self) -> PathBuf {
        database_path(&self.data_dir)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            data_dir: PathBuf::from(DEV_DATA_DIR),
            allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
            static_dir: None,
            sessions: SessionSettings::default(),
            log_dir: None,
        }
    }
}

fn var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Listen address. `DAILYCARDS_ADDR`, else `0.0.0.0:8080`.
pub fn get_addr() -> String {
    var("DAILYCARDS_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string())
}

/// Get the data directory holding the database.
///
/// Priority:
/// 1. DAILYCARDS_DATA_DIR env variable if set
/// 2. $HOME/.local/share/dailycards if HOME is set
/// 3. ./data as fallback
pub fn get_data_dir() -> PathBuf {
    if let Some(dir) = var("DAILYCARDS_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = var("HOME") {
        return PathBuf::from(home).join(DEFAULT_DATA_DIR);
    }

    PathBuf::from(DEV_DATA_DIR)
}

pub fn get_allowed_origins() -> Vec<String> {
    parse_origins(&var("DAILYCARDS_ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string()))
}

/// Directory with a built web client to serve outside `/api`. Unset by default.
pub fn get_static_dir() -> Option<PathBuf> {
    var("DAILYCARDS_STATIC_DIR").map(PathBuf::from)
}

pub fn get_session_ttl() -> Duration {
    session_ttl_from(var("DAILYCARDS_SESSION_TTL_SECS").as_deref())
}

/// Falls back to one day, with a warning, when `raw` is unusable.
fn session_ttl_from(raw: Option<&str>) -> Duration {
    let secs = raw
        .and_then(|raw| {
            let parsed = parse_ttl_secs(raw);
            if parsed.is_none() {
                tracing::warn!(value = %raw, "Invalid DAILYCARDS_SESSION_TTL_SECS, using default");
            }
            parsed
        })
        .unwrap_or(DEFAULT_SESSION_TTL_SECS);
    Duration::from_secs(secs)
}

pub fn get_secure_cookies() -> bool {
    var("DAILYCARDS_SECURE_COOKIES").is_some_and(|v| parse_flag(&v))
}

pub fn get_log_dir() -> Option<PathBuf> {
    var("DAILYCARDS_LOG_DIR").map(PathBuf::from)
}

pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATABASE_FILE)
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// A positive number of seconds, at most [`MAX_SESSION_TTL_SECS`].
pub fn parse_ttl_secs(raw: &str) -> Option<u64> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| (1..=MAX_SESSION_TTL_SECS).contains(secs))
}
