//! Config loader — reads `~/.errsend/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.errsend/config.json`
//! 3. Environment variables `ERRSEND_TELEGRAM__<FIELD>` (override JSON)
//!
//! Absence or corruption of the config file is an expected condition: the
//! loader logs a warning and falls back to defaults, it never fails.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Get the ErrSend data directory (e.g. `~/.errsend/`).
pub fn get_data_path() -> PathBuf {
    let home = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".errsend")
}

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    // Ensure parent directory exists
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `ERRSEND_<SECTION>__<FIELD>` (double underscore as delimiter).
///
/// Supported overrides:
/// - `ERRSEND_TELEGRAM__ENABLED` → `telegram.enabled`
/// - `ERRSEND_TELEGRAM__BOT_TOKEN` → `telegram.bot_token`
/// - `ERRSEND_TELEGRAM__CHAT_ID` → `telegram.chat_id`
/// - `ERRSEND_TELEGRAM__API_BASE` → `telegram.api_base`
fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(val) = std::env::var("ERRSEND_TELEGRAM__ENABLED") {
        match val.parse::<bool>() {
            Ok(v) => config.telegram.enabled = v,
            Err(_) => warn!("Ignoring non-boolean ERRSEND_TELEGRAM__ENABLED: {}", val),
        }
    }
    if let Ok(val) = std::env::var("ERRSEND_TELEGRAM__BOT_TOKEN") {
        config.telegram.bot_token = val;
    }
    if let Ok(val) = std::env::var("ERRSEND_TELEGRAM__CHAT_ID") {
        config.telegram.chat_id = val;
    }
    if let Ok(val) = std::env::var("ERRSEND_TELEGRAM__API_BASE") {
        config.telegram.api_base = val;
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
