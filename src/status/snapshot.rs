//! Node status snapshot for the output sink

use crate::network::session::NetworkStatus;
use crate::payload::SensorReading;
use crate::radio::events::RadioEvent;

/// Everything the display or a serial monitor shows about the node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStatus {
    /// Most recent reading (sentinel values if invalid)
    pub reading: SensorReading,
    /// Uplinks submitted since start-up
    pub tx_count: u32,
    /// Whole seconds until the next uplink is due
    pub seconds_until_next: u32,
    pub last_event: Option<RadioEvent>,
    pub consecutive_errors: u32,
    pub joined: bool,
    pub network_status: NetworkStatus,
    /// Average of the recent uplink intervals, 0 if none recorded
    pub average_interval_ms: f32,
}

impl NodeStatus {
    /// Code of the last event, 0 if none seen yet
    pub fn last_event_code(&self) -> u8 {
        self.last_event.map(|e| e.code()).unwrap_or(0)
    }
}

impl Default for NodeStatus {
    fn default() -> Self {
        Self {
            reading: SensorReading::invalid(),
            tx_count: 0,
            seconds_until_next: 0,
            last_event: None,
            consecutive_errors: 0,
            joined: false,
            network_status: NetworkStatus::Starting,
            average_interval_ms: 0.0,
        }
    }
}
