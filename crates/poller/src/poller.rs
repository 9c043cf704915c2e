use std::time::Duration;

use serde_json::Value;

use herald_common::error::Result;
use herald_common::types::PollCursor;
use herald_notifier::{Notifier, deliver};

use crate::client::StatusSource;
use crate::detector::ChangeDetector;
use crate::translator::translate;
use crate::validator::validate;

/// Sent when the API reports no homework under review.
pub const NO_HOMEWORK_MESSAGE: &str = "У вас пока нет домашних заданий на проверке!";

/// Prefix of the diagnostic sent when a cycle fails.
pub const FAILURE_PREFIX: &str = "Сбой в работе программы: ";

/// Pause between cycles.
#[async_trait::async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real sleeper backed by the tokio timer.
pub struct TokioSleeper;

#[async_trait::async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// What a single cycle ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new message was delivered.
    Notified,
    /// The message equals the last delivered one; nothing was sent.
    Unchanged,
    /// Delivery was attempted and failed; the message is dropped.
    DeliveryFailed,
}

/// Poll, detect, notify. Strictly sequential: one request and one
/// notification in flight at a time.
pub struct StatusPoller<S, N, Z> {
    source: S,
    notifier: N,
    sleeper: Z,
    interval: Duration,
    cursor: PollCursor,
    detector: ChangeDetector,
}

impl<S, N, Z> StatusPoller<S, N, Z>
where
    S: StatusSource,
    N: Notifier,
    Z: Sleeper,
{
    pub fn new(source: S, notifier: N, sleeper: Z, interval: Duration, cursor: PollCursor) -> Self {
        Self {
            source,
            notifier,
            sleeper,
            interval,
            cursor,
            detector: ChangeDetector::new(),
        }
    }

    pub fn cursor(&self) -> PollCursor {
        self.cursor
    }

    pub fn last_notified(&self) -> &str {
        self.detector.last()
    }

    /// Run cycles forever. Returns only when the future is dropped.
    pub async fn run(&mut self) {
        tracing::info!(
            cursor = self.cursor,
            interval_secs = self.interval.as_secs(),
            backend = self.notifier.name(),
            "Status poller started"
        );

        loop {
            self.tick().await;
        }
    }

    /// Run `cycles` cycles, each followed by its sleep.
    pub async fn run_cycles(&mut self, cycles: usize) -> Vec<CycleOutcome> {
        let mut outcomes = Vec::with_capacity(cycles);
        for _ in 0..cycles {
            outcomes.push(self.tick().await);
        }
        outcomes
    }

    /// One cycle followed by the fixed pause, whatever the cycle's result.
    pub async fn tick(&mut self) -> CycleOutcome {
        let outcome = self.poll_once().await;
        self.sleeper.sleep(self.interval).await;
        outcome
    }

    /// One cycle without the pause.
    ///
    /// Failures from the API, the validator or the translator become a
    /// diagnostic message and go through the same change gate as status
    /// messages.
    pub async fn poll_once(&mut self) -> CycleOutcome {
        let message = match self.current_message().await {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(cursor = self.cursor, error = %e, "Poll cycle failed");
                format!("{}{}", FAILURE_PREFIX, e)
            }
        };

        if !self.detector.should_notify(&message) {
            tracing::debug!(cursor = self.cursor, "No status change, nothing sent");
            return CycleOutcome::Unchanged;
        }

        if deliver(&self.notifier, &message).await {
            tracing::info!(cursor = self.cursor, "Notification sent");
            self.detector.record(message);
            CycleOutcome::Notified
        } else {
            CycleOutcome::DeliveryFailed
        }
    }

    async fn current_message(&mut self) -> Result<String> {
        let raw = self.source.fetch(self.cursor).await?;
        self.advance_cursor(&raw);

        let records = validate(&raw)?;
        match records.first() {
            Some(record) => translate(record),
            None => Ok(NO_HOMEWORK_MESSAGE.to_string()),
        }
    }

    /// Move the cursor to the server-reported `current_date`, keeping the
    /// previous value if the field is absent or not an integer.
    fn advance_cursor(&mut self, raw: &Value) {
        match raw.get("current_date").and_then(Value::as_i64) {
            Some(current_date) => self.cursor = current_date,
            None => tracing::warn!(
                cursor = self.cursor,
                "Response has no usable current_date, keeping cursor"
            ),
        }
    }
}
