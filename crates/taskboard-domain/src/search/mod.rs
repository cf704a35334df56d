//! Debounced search input.
//!
//! Keystrokes arrive faster than the board should re-filter. Each input
//! replaces the pending query and restarts the quiet period; the query is
//! released only once no newer input has arrived for the whole period.
//! At most one update is pending at any time.

use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
struct PendingQuery {
    query: String,
    due: Instant,
}

#[derive(Debug, Clone)]
pub struct SearchDebounce {
    quiet_period: Duration,
    pending: Option<PendingQuery>,
}

impl Default for SearchDebounce {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl SearchDebounce {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    /// Records a keystroke, superseding any pending update.
    pub fn input(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some(PendingQuery {
            query: query.into(),
            due: now + self.quiet_period,
        });
    }

    /// Releases the pending query once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let due = self.pending.as_ref()?.due;
        if now < due {
            return None;
        }
        self.pending.take().map(|released| released.query)
    }

    /// Time left before the pending query fires, if any.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|pending| pending.due.saturating_duration_since(now))
    }
}
