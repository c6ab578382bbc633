//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_API_BASE, DEFAULT_AUTO_SAVE_INTERVAL_MS, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use crate::text::normalize_optional_nonempty;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Runtime configuration for Ghostpad.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub db_path: String,
    pub auto_save_interval: u64,
    /// Credential from the environment; takes precedence over the stored key.
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub request_timeout_secs: u64,
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    // Prefer explicit HOME if set (Unix, some Windows shells)
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(PathBuf::from(home));
        }
    }

    // Windows USERPROFILE (standard)
    if let Ok(profile) = env::var("USERPROFILE") {
        if !profile.trim().is_empty() {
            return Some(PathBuf::from(profile));
        }
    }

    std::env::current_dir().ok()
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

fn env_non_empty(name: &str) -> Option<String> {
    normalize_optional_nonempty(env::var(name).ok())
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing
    /// or cannot be parsed.
    pub fn from_env() -> Self {
        Self {
            db_path: env::var("GHOSTPAD_DB_PATH")
                .map(expand_tilde)
                .unwrap_or_else(|_| default_db_path()),
            auto_save_interval: env::var("AUTO_SAVE_INTERVAL")
                .ok()
                .and_then(|i| i.trim().parse().ok())
                .unwrap_or(DEFAULT_AUTO_SAVE_INTERVAL_MS),
            api_key: env_non_empty("GHOSTPAD_API_KEY"),
            api_base: env_non_empty("GHOSTPAD_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            model: env_non_empty("GHOSTPAD_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            request_timeout_secs: env::var("GHOSTPAD_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Pick the credential to use: environment first, then the stored key.
    pub fn resolve_api_key(&self, stored: Option<String>) -> Option<String> {
        normalize_optional_nonempty(self.api_key.clone().or(stored))
    }
}

fn default_db_path() -> String {
    let home = resolve_home_dir().unwrap_or_else(|| PathBuf::from("."));
    let cache_dir = home.join(".cache").join("ghostpad");
    cache_dir.join("db").to_string_lossy().to_string()
}
