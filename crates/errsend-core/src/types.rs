//! Core types for ErrSend — the error event submitted by callers and the
//! result handed back after a dispatch attempt.
//!
//! JSON on the wire uses **camelCase** keys; Rust uses snake_case.
//! `#[serde(rename_all = "camelCase")]` handles the conversion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Error codes
// ─────────────────────────────────────────────

/// Result code for a rejected request (missing event or empty required fields).
pub const CODE_REJECTED: u16 = 400;

/// Result code for a failed delivery (gate disabled or channel send failed).
pub const CODE_DELIVERY_FAILED: u16 = 500;

// ─────────────────────────────────────────────
// ErrorEvent
// ─────────────────────────────────────────────

/// One application error occurrence, as submitted by the reporting system.
///
/// `application` and `message` are required and must be non-empty before the
/// event may be dispatched; everything else is optional, with the empty
/// string standing in for "absent". The timestamp is stamped at creation
/// (UTC) and immutable afterwards.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorEvent {
    /// Name of the application the error occurred in.
    pub application: String,
    /// Application version.
    pub version: String,
    /// Deployment tier (e.g. "Development", "Staging", "Production").
    pub environment: String,
    /// Human-readable error description.
    pub message: String,
    /// Call stack, unbounded at creation (truncated at format time).
    pub stack_trace: String,
    /// Free-form extra context.
    pub additional_info: String,
    /// When the error occurred. Defaults to now (UTC) if unset.
    pub timestamp: DateTime<Utc>,
}

impl Default for ErrorEvent {
    fn default() -> Self {
        Self {
            application: String::new(),
            version: String::new(),
            environment: String::new(),
            message: String::new(),
            stack_trace: String::new(),
            additional_info: String::new(),
            timestamp: Utc::now(),
        }
    }
}

impl ErrorEvent {
    /// Create an event with the required fields, stamped with the current time.
    pub fn new(application: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    /// Set the application version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the deployment tier label.
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Attach a stack trace.
    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = stack_trace.into();
        self
    }

    /// Attach free-form additional context.
    pub fn with_additional_info(mut self, info: impl Into<String>) -> Self {
        self.additional_info = info.into();
        self
    }
}

// ─────────────────────────────────────────────
// NotificationResult
// ─────────────────────────────────────────────

/// Outcome status of a dispatch call.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExecutionStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "ERROR")]
    Error,
}

/// What the caller gets back from every dispatch: a status, an ordered list
/// of human-readable errors, and a numeric code when something went wrong.
///
/// Created fresh per dispatch call; immutable after construction. Callers
/// inspect `status` — failure never arrives as a panic or an escaping error.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResult {
    pub status: ExecutionStatus,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<u16>,
}

impl NotificationResult {
    /// A successful dispatch: status OK, no errors, no code.
    pub fn ok() -> Self {
        Self {
            status: ExecutionStatus::Ok,
            errors: Vec::new(),
            error_code: None,
        }
    }

    /// A failed dispatch with a single error message.
    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self {
            status: ExecutionStatus::Error,
            errors: vec![message.into()],
            error_code: Some(code),
        }
    }

    /// A failed dispatch carrying every violation found.
    pub fn errors(code: u16, messages: Vec<String>) -> Self {
        Self {
            status: ExecutionStatus::Error,
            errors: messages,
            error_code: Some(code),
        }
    }

    /// Whether the dispatch succeeded.
    pub fn is_ok(&self) -> bool {
        self.status == ExecutionStatus::Ok
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
