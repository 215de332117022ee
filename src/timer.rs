//! Single-slot deferred action
//!
//! A one-shot software timer holding at most one pending request. Scheduling
//! while a request is pending replaces it; firing consumes it.

/// Milliseconds on the node's monotonic clock
pub type Millis = u64;

/// One-shot timer with a single pending slot
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeferredAction {
    due_at: Option<Millis>,
}

impl DeferredAction {
    /// Create an idle timer
    pub const fn new() -> Self {
        Self { due_at: None }
    }

    /// Arm the timer to fire `delay_ms` after `now`, replacing any pending request
    pub fn schedule(&mut self, now: Millis, delay_ms: u32) {
        self.due_at = Some(now.saturating_add(delay_ms as Millis));
    }

    /// Drop the pending request, if any
    pub fn cancel(&mut self) {
        self.due_at = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due_at.is_some()
    }

    /// Absolute time of the pending request
    pub fn due_at(&self) -> Option<Millis> {
        self.due_at
    }

    /// Time left until the pending request is due (0 once overdue)
    pub fn remaining(&self, now: Millis) -> Option<Millis> {
        self.due_at.map(|due| due.saturating_sub(now))
    }

    /// Consume the pending request if it is due.
    ///
    /// Returns true exactly once per scheduled request.
    pub fn fire(&mut self, now: Millis) -> bool {
        match self.due_at {
            Some(due) if now >= due => {
                self.due_at = None;
                true
            }
            _ => false,
        }
    }
}
