//! Events raised by the MAC stack
//!
//! Codes follow the LMIC `ev_t` numbering so that diagnostics match what
//! the stack itself logs.

/// Event raised by the MAC stack while it runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioEvent {
    /// Join procedure started (5)
    Joining,
    /// Network session established (6)
    Joined,
    /// Join procedure gave up (8)
    JoinFailed,
    /// Uplink and its receive windows finished (10)
    TxComplete {
        /// The network acknowledged a confirmed uplink
        ack: bool,
        /// Length of the downlink received in the RX windows
        downlink_len: u32,
    },
    /// MAC state was reset (12)
    Reset,
    /// Any event this node does not act on
    Other(u8),
}

impl RadioEvent {
    pub const CODE_JOINING: u8 = 5;
    pub const CODE_JOINED: u8 = 6;
    pub const CODE_JOIN_FAILED: u8 = 8;
    pub const CODE_TX_COMPLETE: u8 = 10;
    pub const CODE_RESET: u8 = 12;

    /// Numeric event code
    pub fn code(&self) -> u8 {
        match self {
            Self::Joining => Self::CODE_JOINING,
            Self::Joined => Self::CODE_JOINED,
            Self::JoinFailed => Self::CODE_JOIN_FAILED,
            Self::TxComplete { .. } => Self::CODE_TX_COMPLETE,
            Self::Reset => Self::CODE_RESET,
            Self::Other(code) => *code,
        }
    }

    /// Build an event from a stack event code.
    ///
    /// A TX-complete code carries its ack flag and downlink length, which the
    /// caller reads from the stack alongside the code.
    pub fn from_code(code: u8, ack: bool, downlink_len: u32) -> Self {
        match code {
            Self::CODE_JOINING => Self::Joining,
            Self::CODE_JOINED => Self::Joined,
            Self::CODE_JOIN_FAILED => Self::JoinFailed,
            Self::CODE_TX_COMPLETE => Self::TxComplete { ack, downlink_len },
            Self::CODE_RESET => Self::Reset,
            other => Self::Other(other),
        }
    }
}
