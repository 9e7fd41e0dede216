//! Notification gate — the one-time enablement decision.
//!
//! Derived from configuration exactly once, at startup. A disabled gate
//! announces itself with a single diagnostic (warn when the flag is off,
//! error when credentials are missing despite the flag) and then silently
//! blocks every dispatch for the rest of the process.

use errsend_core::config::TelegramConfig;
use tracing::{error, warn};

/// Immutable enablement state, consulted on every dispatch.
#[derive(Clone, Debug)]
pub struct NotificationGate {
    enabled: bool,
    destination: String,
}

impl NotificationGate {
    /// Determine enablement from the loaded configuration.
    ///
    /// Enabled only when the flag is set AND both the bot token and the
    /// chat id are present. The disabling condition is logged here, once
    /// (with its own severity per cause); later queries are silent.
    pub fn from_config(config: &TelegramConfig) -> Self {
        if !config.enabled {
            warn!("telegram notifications are disabled in configuration");
            return Self::disabled();
        }

        // Deliberately switched on but missing credentials is a louder
        // problem than the flag being off.
        if !config.is_configured() {
            error!("telegram bot token or chat id missing from configuration, notifications disabled");
            return Self::disabled();
        }

        Self {
            enabled: true,
            destination: config.chat_id.clone(),
        }
    }

    fn disabled() -> Self {
        Self {
            enabled: false,
            destination: String::new(),
        }
    }

    /// Whether delivery may be attempted.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The destination chat identifier. Empty when disabled.
    pub fn destination(&self) -> &str {
        &self.destination
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> TelegramConfig {
        TelegramConfig {
            enabled: true,
            bot_token: "123:abc".into(),
            chat_id: "-1001".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_enabled_with_full_config() {
        let gate = NotificationGate::from_config(&full_config());
        assert!(gate.is_enabled());
        assert_eq!(gate.destination(), "-1001");
    }

    #[test]
    fn test_disabled_by_flag() {
        let config = TelegramConfig {
            enabled: false,
            ..full_config()
        };
        let gate = NotificationGate::from_config(&config);
        assert!(!gate.is_enabled());
    }

    #[test]
    fn test_disabled_without_token() {
        let config = TelegramConfig {
            bot_token: String::new(),
            ..full_config()
        };
        assert!(!NotificationGate::from_config(&config).is_enabled());
    }

    #[test]
    fn test_disabled_without_chat_id() {
        let config = TelegramConfig {
            chat_id: String::new(),
            ..full_config()
        };
        assert!(!NotificationGate::from_config(&config).is_enabled());
    }

    #[test]
    fn test_disabled_gate_has_no_destination() {
        let gate = NotificationGate::from_config(&TelegramConfig::default());
        assert!(gate.destination().is_empty());
    }

    #[test]
    fn test_determination_is_stable() {
        // The gate never re-reads configuration.
        let gate = NotificationGate::from_config(&TelegramConfig::default());
        for _ in 0..10 {
            assert!(!gate.is_enabled());
        }
    }
}
