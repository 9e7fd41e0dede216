//! Dispatcher — the end-to-end pipeline for a single error event.
//!
//! Linear state machine, no retries: validate → gate → format → send →
//! report. Every failure mode is absorbed into the returned
//! [`NotificationResult`]; callers inspect its status instead of catching
//! anything.
//!
//! Each dispatch is independent and stateless — concurrent dispatches share
//! only the read-only gate and the `Arc`'d channel client, so no locking
//! discipline is needed here.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use errsend_channels::ChannelClient;
use errsend_core::types::{CODE_DELIVERY_FAILED, CODE_REJECTED};
use errsend_core::{ErrorEvent, NotificationResult};

use crate::format::render;
use crate::gate::NotificationGate;
use crate::validate::validate;

/// Everything that can stop an event from being delivered.
///
/// Internal to the pipeline — always mapped to a `NotificationResult`
/// before it reaches the caller.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No event was supplied at all.
    #[error("no error event was supplied")]
    MissingEvent,

    /// Required fields were empty; the request never reached the gate.
    #[error("error event failed validation")]
    Invalid { violations: Vec<String> },

    /// Delivery is disabled or incompletely configured for this process.
    #[error("error notifications are disabled or not configured")]
    GateDisabled,

    /// The channel client reported that delivery did not occur.
    #[error("failed to deliver error notification")]
    Delivery(#[source] anyhow::Error),
}

impl DispatchError {
    /// Fixed numeric result code for this failure class.
    fn code(&self) -> u16 {
        match self {
            DispatchError::MissingEvent | DispatchError::Invalid { .. } => CODE_REJECTED,
            DispatchError::GateDisabled | DispatchError::Delivery(_) => CODE_DELIVERY_FAILED,
        }
    }

    /// Convert into the result handed back to the caller.
    fn into_result(self) -> NotificationResult {
        let code = self.code();
        match self {
            DispatchError::Invalid { violations } => NotificationResult::errors(code, violations),
            other => NotificationResult::error(code, other.to_string()),
        }
    }
}

/// Orchestrates validation, gating, formatting, and delivery.
pub struct Dispatcher {
    gate: NotificationGate,
    client: Arc<dyn ChannelClient>,
}

impl Dispatcher {
    /// Build a dispatcher over a gate and a shared channel client.
    pub fn new(gate: NotificationGate, client: Arc<dyn ChannelClient>) -> Self {
        Self { gate, client }
    }

    /// Dispatch one error event.
    ///
    /// `None` models a request that arrived without an event — it is
    /// rejected on its own path, with its own diagnostic, before field
    /// validation runs. A single failed attempt is terminal; nothing is
    /// retried. The returned future is cancellable by drop (the only
    /// suspension point is the network send).
    pub async fn dispatch(&self, event: Option<&ErrorEvent>) -> NotificationResult {
        match self.try_dispatch(event).await {
            Ok(()) => NotificationResult::ok(),
            Err(e) => e.into_result(),
        }
    }

    async fn try_dispatch(&self, event: Option<&ErrorEvent>) -> Result<(), DispatchError> {
        let event = match event {
            Some(e) => e,
            None => {
                warn!("attempted to dispatch a missing error event");
                return Err(DispatchError::MissingEvent);
            }
        };

        let violations = validate(event);
        if !violations.is_empty() {
            warn!(violations = ?violations, "rejected invalid error event");
            return Err(DispatchError::Invalid { violations });
        }

        // The gate already logged its reason once, at construction.
        if !self.gate.is_enabled() {
            return Err(DispatchError::GateDisabled);
        }

        let text = render(event);

        match self.client.send(self.gate.destination(), &text).await {
            Ok(()) => {
                info!(
                    channel = self.client.name(),
                    application = %event.application,
                    message = %event.message,
                    "error notification delivered"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    channel = self.client.name(),
                    error = %format!("{:#}", e),
                    "error notification delivery failed"
                );
                Err(DispatchError::Delivery(e))
            }
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use errsend_core::config::TelegramConfig;
    use errsend_core::ExecutionStatus;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records every send; optionally fails them all.
    struct MockClient {
        fail: bool,
        calls: AtomicUsize,
        sent: tokio::sync::Mutex<Vec<(String, String)>>,
    }

    impl MockClient {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fail,
                calls: AtomicUsize::new(0),
                sent: tokio::sync::Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChannelClient for MockClient {
        fn name(&self) -> &str {
            "mock"
        }

        async fn send(&self, destination: &str, text: &str) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("connection reset by peer");
            }
            let mut sent = self.sent.lock().await;
            sent.push((destination.to_string(), text.to_string()));
            Ok(())
        }
    }

    fn enabled_gate() -> NotificationGate {
        NotificationGate::from_config(&TelegramConfig {
            enabled: true,
            bot_token: "123:abc".into(),
            chat_id: "-1001".into(),
            ..Default::default()
        })
    }

    fn disabled_gate() -> NotificationGate {
        NotificationGate::from_config(&TelegramConfig::default())
    }

    #[tokio::test]
    async fn test_successful_dispatch() {
        let client = MockClient::new(false);
        let dispatcher = Dispatcher::new(enabled_gate(), client.clone());

        let event = ErrorEvent::new("Billing", "NullRef");
        let result = dispatcher.dispatch(Some(&event)).await;

        assert_eq!(result.status, ExecutionStatus::Ok);
        assert!(result.errors.is_empty());
        assert_eq!(result.error_code, None);

        let sent = client.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "-1001");
        assert!(sent[0].1.starts_with("<b>ERROR</b>"));
        assert!(sent[0].1.contains("Billing"));
        assert!(sent[0].1.contains("NullRef"));
        // Empty optionals produce no sections.
        assert!(!sent[0].1.contains("Version:"));
        assert!(!sent[0].1.contains("Environment:"));
        assert!(!sent[0].1.contains("<pre>"));
        assert!(!sent[0].1.contains("Additional info:"));
    }

    #[tokio::test]
    async fn test_missing_event_rejected_without_send() {
        let client = MockClient::new(false);
        let dispatcher = Dispatcher::new(enabled_gate(), client.clone());

        let result = dispatcher.dispatch(None).await;

        assert_eq!(result.status, ExecutionStatus::Error);
        assert_eq!(result.error_code, Some(400));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_fields_rejected_without_send() {
        let client = MockClient::new(false);
        let dispatcher = Dispatcher::new(enabled_gate(), client.clone());

        let event = ErrorEvent::new("", "");
        let result = dispatcher.dispatch(Some(&event)).await;

        assert_eq!(result.status, ExecutionStatus::Error);
        assert_eq!(result.error_code, Some(400));
        assert_eq!(result.errors.len(), 2);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_disabled_gate_short_circuits_every_call() {
        let client = MockClient::new(false);
        let dispatcher = Dispatcher::new(disabled_gate(), client.clone());

        let event = ErrorEvent::new("Billing", "NullRef");
        for _ in 0..5 {
            let result = dispatcher.dispatch(Some(&event)).await;
            assert_eq!(result.status, ExecutionStatus::Error);
            assert_eq!(result.error_code, Some(500));
        }
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_delivery_failure_maps_to_error_result() {
        let client = MockClient::new(true);
        let dispatcher = Dispatcher::new(enabled_gate(), client.clone());

        let event = ErrorEvent::new("Billing", "NullRef")
            .with_stack_trace("at main()")
            .with_additional_info("request id 42");
        let result = dispatcher.dispatch(Some(&event)).await;

        assert_eq!(result.status, ExecutionStatus::Error);
        assert_eq!(result.error_code, Some(500));
        assert!(!result.errors.is_empty());
        // The send was attempted exactly once — no retries.
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_delivery_failure_independent_of_event_content() {
        let client = MockClient::new(true);
        let dispatcher = Dispatcher::new(enabled_gate(), client.clone());

        let plain = ErrorEvent::new("Billing", "boom");
        let loaded = ErrorEvent::new("Auth", "<panic> & more")
            .with_version("9.9")
            .with_stack_trace("x".repeat(5000));

        let r1 = dispatcher.dispatch(Some(&plain)).await;
        let r2 = dispatcher.dispatch(Some(&loaded)).await;

        assert_eq!(r1.status, ExecutionStatus::Error);
        assert_eq!(r1.error_code, r2.error_code);
        assert_eq!(r1.errors, r2.errors);
    }

    #[tokio::test]
    async fn test_long_stack_trace_sent_truncated() {
        let client = MockClient::new(false);
        let dispatcher = Dispatcher::new(enabled_gate(), client.clone());

        let event = ErrorEvent::new("Billing", "NullRef").with_stack_trace("s".repeat(1000));
        let result = dispatcher.dispatch(Some(&event)).await;
        assert!(result.is_ok());

        let sent = client.sent.lock().await;
        let text = &sent[0].1;
        let pre_start = text.find("<pre>").unwrap() + 5;
        let pre_end = text.find("</pre>").unwrap();
        assert_eq!(text[pre_start..pre_end].chars().count(), 803);
    }

    #[tokio::test]
    async fn test_concurrent_dispatches_share_one_client() {
        let client = MockClient::new(false);
        let dispatcher = Arc::new(Dispatcher::new(enabled_gate(), client.clone()));

        let mut handles = Vec::new();
        for i in 0..8 {
            let d = dispatcher.clone();
            handles.push(tokio::spawn(async move {
                let event = ErrorEvent::new("Billing", format!("error {i}"));
                d.dispatch(Some(&event)).await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
        assert_eq!(client.call_count(), 8);
    }
}
