//! ErrSend core — the error-event data model and configuration system.
//!
//! This crate holds everything the notification pipeline and the channel
//! clients share:
//! - **types**: `ErrorEvent`, `NotificationResult`, `ExecutionStatus`
//! - **config**: typed schema, JSON loader, env var overrides

pub mod config;
pub mod types;

pub use config::{load_config, Config};
pub use types::{ErrorEvent, ExecutionStatus, NotificationResult};
