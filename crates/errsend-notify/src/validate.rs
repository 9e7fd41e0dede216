//! Required-field validation for inbound error events.
//!
//! A pure function returning the ordered list of violations — no side
//! effects, no early exit, so the caller can report every problem at once.

use errsend_core::ErrorEvent;

/// Check an event's required fields.
///
/// Returns an empty vec when the event may be dispatched. Whitespace-only
/// values count as empty.
pub fn validate(event: &ErrorEvent) -> Vec<String> {
    let mut violations = Vec::new();

    if event.application.trim().is_empty() {
        violations.push("'application' must not be empty".to_string());
    }
    if event.message.trim().is_empty() {
        violations.push("'message' must not be empty".to_string());
    }

    violations
}
