//! ErrSend Notify — the notification pipeline.
//!
//! This crate turns an [`ErrorEvent`](errsend_core::ErrorEvent) into a
//! delivered (or explicitly failed) Telegram message:
//!
//! - **validate**: pure required-field checks, returning a violation list
//! - **gate**: one-time enablement determination from configuration
//! - **format**: sanitized, length-bounded HTML rendering
//! - **dispatch**: validate → gate → format → send → `NotificationResult`
//!
//! Nothing in this crate panics or lets an error escape: every outcome,
//! good or bad, is absorbed into the result handed back to the caller.

pub mod dispatch;
pub mod format;
pub mod gate;
pub mod validate;

pub use dispatch::{DispatchError, Dispatcher};
pub use format::render;
pub use gate::NotificationGate;
