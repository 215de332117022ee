//! Network session state and diagnostics

use crate::radio::events::RadioEvent;

/// Human-readable link state shown on the status output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatus {
    Starting,
    Joining,
    Joined,
    JoinFailed,
    TxOk,
    Reset,
}

impl NetworkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Starting => "Starting...",
            Self::Joining => "Joining...",
            Self::Joined => "Connected!",
            Self::JoinFailed => "Join Failed",
            Self::TxOk => "TX OK",
            Self::Reset => "Reset",
        }
    }

    /// Wire code used in status frames
    pub fn code(&self) -> u8 {
        match self {
            Self::Starting => 0,
            Self::Joining => 1,
            Self::Joined => 2,
            Self::JoinFailed => 3,
            Self::TxOk => 4,
            Self::Reset => 5,
        }
    }
}

/// Session state owned by the event bridge.
///
/// The scheduler reads it but never writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub joined: bool,
    pub last_event: Option<RadioEvent>,
    pub network_status: NetworkStatus,
    /// The last uplink was acknowledged
    pub last_ack: bool,
    /// Bytes received in the last downlink
    pub last_downlink_len: u32,
}

impl SessionState {
    pub const fn new() -> Self {
        Self {
            joined: false,
            last_event: None,
            network_status: NetworkStatus::Starting,
            last_ack: false,
            last_downlink_len: 0,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
