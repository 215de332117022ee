//! Observed inter-transmission intervals
//!
//! Purely diagnostic: the history is reported but never feeds back into
//! scheduling decisions.

use crate::config::timing::HISTORY_DEPTH;
use heapless::HistoryBuffer;

/// Ring buffer of the most recent uplink intervals
pub struct TimingMonitor {
    intervals: HistoryBuffer<u32, HISTORY_DEPTH>,
}

impl TimingMonitor {
    pub fn new() -> Self {
        Self {
            intervals: HistoryBuffer::new(),
        }
    }

    /// Record an observed interval, overwriting the oldest once full
    pub fn record(&mut self, interval_ms: u32) {
        self.intervals.write(interval_ms);
    }

    /// Mean of the recorded intervals in milliseconds, 0 while empty
    pub fn average(&self) -> f32 {
        let count = self.intervals.len();
        if count == 0 {
            return 0.0;
        }

        let sum: u64 = self.intervals.as_slice().iter().map(|&ms| ms as u64).sum();
        sum as f32 / count as f32
    }

    /// Number of populated slots
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.len() == 0
    }

    /// Most recently recorded interval
    pub fn last(&self) -> Option<u32> {
        self.intervals.recent().copied()
    }
}

impl Default for TimingMonitor {
    fn default() -> Self {
        Self::new()
    }
}
