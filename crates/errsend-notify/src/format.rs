//! Message formatting — renders an `ErrorEvent` as Telegram-ready HTML.
//!
//! Pure and deterministic: no I/O, no failure paths. Every user-supplied
//! field is HTML-escaped before insertion so error text containing markup
//! (or crafted to contain it) cannot break out of its section. Stack traces
//! are capped at 800 characters to stay well inside Telegram's message
//! limit.

use errsend_core::ErrorEvent;

/// Maximum number of stack-trace characters kept in the rendered message.
pub const MAX_STACK_TRACE_LEN: usize = 800;

/// Escape the three HTML-significant characters.
///
/// Ampersand first, so entities produced by the later replacements are not
/// escaped a second time.
pub fn html_encode(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Cap a stack trace at [`MAX_STACK_TRACE_LEN`] characters.
///
/// Traces at or under the cap pass through verbatim; longer ones keep
/// exactly the first 800 characters plus a trailing `"..."`. Counts
/// `char`s, so multi-byte traces never split a code point.
pub fn truncate_stack_trace(trace: &str) -> String {
    if trace.chars().count() <= MAX_STACK_TRACE_LEN {
        return trace.to_string();
    }
    let kept: String = trace.chars().take(MAX_STACK_TRACE_LEN).collect();
    format!("{kept}...")
}

/// Render the full notification message for one event.
///
/// Layout:
/// - fixed `ERROR` header
/// - application (always), version and environment (only when non-empty)
/// - timestamp as `YYYY-MM-DD HH:mm:ss` (UTC, always)
/// - message (always)
/// - stack trace in a `<pre>` block, truncated, only when non-empty
/// - additional info section, only when non-empty
pub fn render(event: &ErrorEvent) -> String {
    let mut out = String::new();

    out.push_str("<b>ERROR</b>\n\n");

    out.push_str(&format!(
        "<b>Application:</b> {}\n",
        html_encode(&event.application)
    ));

    if !event.version.is_empty() {
        out.push_str(&format!("<b>Version:</b> {}\n", html_encode(&event.version)));
    }

    if !event.environment.is_empty() {
        out.push_str(&format!(
            "<b>Environment:</b> {}\n",
            html_encode(&event.environment)
        ));
    }

    out.push_str(&format!(
        "<b>Time:</b> {}\n",
        event.timestamp.format("%Y-%m-%d %H:%M:%S")
    ));

    out.push_str(&format!("\n<b>Message:</b> {}\n", html_encode(&event.message)));

    if !event.stack_trace.is_empty() {
        out.push_str("\n<b>Stack trace:</b>\n");
        out.push_str(&format!(
            "<pre>{}</pre>\n",
            html_encode(&truncate_stack_trace(&event.stack_trace))
        ));
    }

    if !event.additional_info.is_empty() {
        out.push_str("\n<b>Additional info:</b>\n");
        out.push_str(&format!("{}\n", html_encode(&event.additional_info)));
    }

    out
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
