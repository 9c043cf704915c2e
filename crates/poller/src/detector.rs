//! Change detection between two consecutive notifications.
//!
//! Only the last delivered message is remembered. State is in-memory and
//! resets with the process.

/// Whether `candidate` differs from the last delivered message.
pub fn should_notify(candidate: &str, last: &str) -> bool {
    candidate != last
}

/// Holds the most recently delivered message.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    last: String,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_notify(&self, candidate: &str) -> bool {
        should_notify(candidate, &self.last)
    }

    /// Remember `message` as delivered. Call only after a successful send.
    pub fn record(&mut self, message: String) {
        self.last = message;
    }

    pub fn last(&self) -> &str {
        &self.last
    }
}
