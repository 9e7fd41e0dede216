//! Configuration schema — the typed shape of `~/.errsend/config.json`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.
//!
//! Config is loaded once at startup and treated as read-only for the
//! process lifetime — there is no hot-reload.

use serde::{Deserialize, Serialize};

/// Default Telegram Bot API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.errsend/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub telegram: TelegramConfig,
}

// ─────────────────────────────────────────────
// Telegram
// ─────────────────────────────────────────────

/// Telegram delivery settings.
///
/// Delivery is attempted only when `enabled` is true AND both `bot_token`
/// and `chat_id` are non-empty. Anything less leaves notifications off for
/// the whole process lifetime.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TelegramConfig {
    /// Master switch for outbound notifications.
    pub enabled: bool,
    /// Bot token from @BotFather.
    pub bot_token: String,
    /// Destination chat identifier.
    pub chat_id: String,
    /// Bot API base URL (override for tests / self-hosted Bot API servers).
    pub api_base: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bot_token: String::new(),
            chat_id: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl TelegramConfig {
    /// Whether both credential fields are present.
    pub fn is_configured(&self) -> bool {
        !self.bot_token.is_empty() && !self.chat_id.is_empty()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
