//! Cadence bookkeeping for the uplink interval

use crate::config::cadence::TX_INTERVAL_MS;
use crate::timer::Millis;

/// When the last uplink went out and whether the next one is forced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CadenceState {
    /// Time of the last submitted uplink, 0 if none yet
    pub last_transmission_ms: Millis,
    /// Send on the next attempt regardless of elapsed time (one-shot)
    pub force_next: bool,
    pub target_interval_ms: u32,
}

impl CadenceState {
    pub const fn new(target_interval_ms: u32) -> Self {
        Self {
            last_transmission_ms: 0,
            force_next: false,
            target_interval_ms,
        }
    }

    /// True if nothing has been sent since start-up or the last join
    pub fn never_transmitted(&self) -> bool {
        self.last_transmission_ms == 0
    }

    /// Time since the last uplink
    pub fn elapsed(&self, now: Millis) -> Millis {
        now.saturating_sub(self.last_transmission_ms)
    }

    /// Whether an attempt at `now` may send
    pub fn is_due(&self, now: Millis) -> bool {
        self.never_transmitted()
            || self.force_next
            || self.elapsed(now) >= self.target_interval_ms as Millis
    }

    /// Time left until the cadence boundary, 0 once reached
    pub fn remaining_ms(&self, now: Millis) -> u32 {
        if self.never_transmitted() {
            return 0;
        }
        (self.target_interval_ms as Millis).saturating_sub(self.elapsed(now)) as u32
    }
}

impl Default for CadenceState {
    fn default() -> Self {
        Self::new(TX_INTERVAL_MS)
    }
}
