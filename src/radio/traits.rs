//! LoRaWAN MAC stack trait for abstraction and testability
//!
//! The MAC engine (join procedure, channel plan enforcement, duty cycle)
//! lives outside this crate. This trait is the surface the scheduler and
//! event bridge need from it, allowing a mock to stand in for testing.

use crate::radio::events::RadioEvent;

/// Errors returned when handing an uplink to the MAC stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioError {
    /// A transmission or receive window is still pending
    Busy,
    /// No network session
    NotJoined,
    /// Payload exceeds the maximum for the current data rate
    PayloadTooLarge,
    /// Rejected by the stack for any other reason
    Rejected,
}

/// Spreading factor used for fixed-rate uplinks
///
/// The link policy pins SF7 once joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadingFactor {
    Sf7,
}

/// Abstract LoRaWAN MAC interface
pub trait RadioStack {
    /// True while a transmission or its receive windows are pending
    fn is_send_busy(&self) -> bool;

    /// Queue an uplink for transmission
    fn submit_uplink(&mut self, port: u8, data: &[u8], confirmed: bool) -> Result<(), RadioError>;

    /// Run the stack once, returning the event it raised, if any
    fn poll(&mut self) -> Option<RadioEvent>;

    /// Reset the MAC state
    fn reset(&mut self);

    /// Begin the over-the-air join procedure
    fn start_joining(&mut self);

    /// Restrict the channel plan to one sub-band
    fn select_sub_band(&mut self, band: u8);

    /// Number of channels in the regional plan
    fn channel_count(&self) -> u8;

    /// Disable a single channel
    fn disable_channel(&mut self, channel: u8);

    /// Enable or disable link-check requests
    fn set_link_check(&mut self, enabled: bool);

    /// Enable or disable adaptive data rate
    fn set_adr(&mut self, enabled: bool);

    /// Fix the data rate and transmit power
    fn set_data_rate(&mut self, spreading_factor: SpreadingFactor, tx_power_dbm: i8);

    /// Set the tolerated clock error, in percent
    fn set_clock_error_percent(&mut self, percent: u8);
}
