//! Telegram client — direct Bot API `sendMessage` over `reqwest`.
//!
//! One endpoint is all this service needs, so we talk to the Bot API
//! directly instead of pulling in a bot framework. Messages are sent with
//! `parse_mode: HTML`; the formatter upstream is responsible for escaping.
//!
//! The Bot API wraps every response in an envelope:
//! `{ "ok": true, "result": ... }` or
//! `{ "ok": false, "error_code": ..., "description": "..." }`.
//! Delivery counts as successful only when the HTTP status is 2xx AND
//! `ok` is true.

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::base::ChannelClient;

/// Telegram Bot API client.
///
/// Holds a pooled `reqwest::Client`; safe to share across concurrent sends.
pub struct TelegramClient {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// Bot API base URL (e.g. `"https://api.telegram.org"`).
    api_base: String,
    /// Bot token from @BotFather. Never logged.
    token: String,
}

/// Bot API response envelope. `result` is ignored — only `ok` matters here.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    error_code: Option<i64>,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl TelegramClient {
    /// Create a new client for the given API base and bot token.
    pub fn new(api_base: impl Into<String>, token: impl Into<String>) -> Self {
        let client = reqwest::Client::new();
        Self {
            client,
            api_base: api_base.into(),
            token: token.into(),
        }
    }

    /// Build the full `sendMessage` URL.
    fn send_message_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/bot{}/sendMessage", base, self.token)
    }
}

#[async_trait]
impl ChannelClient for TelegramClient {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, destination: &str, text: &str) -> anyhow::Result<()> {
        let body = serde_json::json!({
            "chat_id": destination,
            "text": text,
            "parse_mode": "HTML",
        });

        let response = self
            .client
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await
            .context("telegram sendMessage request failed")?;

        let status = response.status();
        let envelope: ApiResponse = response
            .json()
            .await
            .context("telegram returned a non-JSON response")?;

        if !status.is_success() || !envelope.ok {
            anyhow::bail!(
                "telegram rejected the message (http {}, code {:?}): {}",
                status.as_u16(),
                envelope.error_code,
                envelope.description.as_deref().unwrap_or("no description")
            );
        }

        debug!(chat_id = %destination, chars = text.len(), "telegram message sent");
        Ok(())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
