//! ChannelClient trait — the abstract capability the dispatcher calls
//! to deliver one formatted message.
//!
//! The pipeline never sees the wire protocol: it hands over a destination
//! identifier and the final text, and gets back success or failure-with-cause.
//! Implementations must be safe for concurrent use — a single instance is
//! shared (`Arc<dyn ChannelClient>`) across all in-flight dispatches.

use async_trait::async_trait;

/// Every outbound message channel implements this trait.
#[async_trait]
pub trait ChannelClient: Send + Sync {
    /// Unique channel name (e.g. "telegram").
    fn name(&self) -> &str;

    /// Deliver `text` to `destination`.
    ///
    /// Returns `Err` with the underlying cause when delivery did not occur;
    /// the caller does not need finer-grained failure subtypes. The future
    /// is cancellable by drop — no internal timeout is imposed, so callers
    /// that want one wrap the call themselves.
    async fn send(&self, destination: &str, text: &str) -> anyhow::Result<()>;
}
