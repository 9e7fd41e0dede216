//! ErrSend Channels — outbound message delivery clients.
//!
//! This crate provides:
//! - **base**: The `ChannelClient` trait — "send this text to that destination"
//! - **telegram**: The Telegram Bot API client fulfilling it
//!
//! The notification pipeline only ever sees `ChannelClient`; the concrete
//! wire protocol lives entirely in this crate.

pub mod base;
pub mod telegram;

pub use base::ChannelClient;
pub use telegram::TelegramClient;
