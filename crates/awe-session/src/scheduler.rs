use std::time::{Duration, Instant};

/// Single pending suggestion update. Scheduling again replaces the pending
/// one, so rapid keystrokes coalesce into one query.
#[derive(Debug, Clone)]
pub struct SuggestionTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl SuggestionTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Cancel any pending update and schedule a new one `delay` after `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the pending update if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if d <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Consume the pending update regardless of its deadline.
    pub fn take(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}
