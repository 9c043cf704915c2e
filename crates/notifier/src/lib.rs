//! Notification delivery to the single configured chat.
//!
//! The [`Notifier`] trait is the narrow capability the poll loop depends on.
//! [`deliver`] wraps it so that a failed delivery is logged and dropped
//! instead of reaching the caller. The only production backend is
//! [`telegram::TelegramNotifier`].

pub mod telegram;

use herald_common::error::Result;

/// Sends a plain-text message to a fixed destination.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Send `text`. Errors are handled by [`deliver`].
    async fn send(&self, text: &str) -> Result<()>;

    /// Backend name (e.g. `"telegram"`), used in log lines.
    fn name(&self) -> &str;
}

/// Attempt delivery once and report whether it succeeded.
///
/// Never fails: a delivery error is logged and the message is dropped.
pub async fn deliver(notifier: &dyn Notifier, text: &str) -> bool {
    match notifier.send(text).await {
        Ok(()) => {
            tracing::debug!(backend = notifier.name(), text, "Message delivered");
            true
        }
        Err(e) => {
            tracing::error!(
                backend = notifier.name(),
                text,
                error = %e,
                "Failed to deliver message"
            );
            false
        }
    }
}
