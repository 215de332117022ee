//! Output sink trait and the sinks that need no hardware
//!
//! Rendering is left to the display driver; a sink only receives snapshots.

use crate::status::snapshot::NodeStatus;

/// Consumer of node status snapshots
pub trait StatusSink {
    fn publish(&mut self, status: &NodeStatus);
}

/// Sink that discards every snapshot.
///
/// Stands in when the display failed to initialise so the node keeps
/// sampling and sending.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl StatusSink for NullSink {
    fn publish(&mut self, _status: &NodeStatus) {}
}

/// Sink that writes a one-line summary to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn publish(&mut self, status: &NodeStatus) {
        if status.reading.valid {
            log::info!(
                "[{}] T: {:.1} C, H: {:.1} %, TX: {}, next: {} s, ev: {}, err: {}",
                status.network_status.as_str(),
                status.reading.temperature_c,
                status.reading.humidity_pct,
                status.tx_count,
                status.seconds_until_next,
                status.last_event_code(),
                status.consecutive_errors
            );
        } else {
            log::info!(
                "[{}] T: ERROR, H: ERROR, TX: {}, next: {} s, ev: {}, err: {}",
                status.network_status.as_str(),
                status.tx_count,
                status.seconds_until_next,
                status.last_event_code(),
                status.consecutive_errors
            );
        }
    }
}

/// An absent sink publishes nothing
impl<T: StatusSink> StatusSink for Option<T> {
    fn publish(&mut self, status: &NodeStatus) {
        if let Some(sink) = self {
            sink.publish(status);
        }
    }
}

/// Fan a snapshot out to two sinks
impl<A: StatusSink, B: StatusSink> StatusSink for (A, B) {
    fn publish(&mut self, status: &NodeStatus) {
        self.0.publish(status);
        self.1.publish(status);
    }
}

/// Detects uplinks between consecutive snapshots.
///
/// Used by the TX LED: a snapshot whose counter differs from the previous
/// one means at least one uplink was submitted in between.
#[derive(Debug, Default, Clone, Copy)]
pub struct TxActivity {
    last_tx_count: u32,
}

impl TxActivity {
    pub const fn new() -> Self {
        Self { last_tx_count: 0 }
    }

    /// Record the snapshot's counter; true if it moved since the last call
    pub fn observe(&mut self, status: &NodeStatus) -> bool {
        if status.tx_count == self.last_tx_count {
            return false;
        }
        self.last_tx_count = status.tx_count;
        true
    }
}
