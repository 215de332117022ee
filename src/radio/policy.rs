//! Fixed link configuration applied once the node has joined

use crate::config::link;
use crate::radio::traits::{RadioStack, SpreadingFactor};

/// Channel and rate settings that replace adaptive data rate
#[derive(Debug, Clone)]
pub struct LinkPolicy {
    /// Channels left enabled; every other channel is disabled
    pub enabled_channels: &'static [u8],
    pub spreading_factor: SpreadingFactor,
    pub tx_power_dbm: i8,
    pub adr: bool,
    pub link_check: bool,
    pub clock_error_percent: u8,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self {
            enabled_channels: &link::ENABLED_CHANNELS,
            spreading_factor: SpreadingFactor::Sf7,
            tx_power_dbm: link::TX_POWER_DBM,
            adr: false,
            link_check: false,
            clock_error_percent: link::CLOCK_ERROR_PCT,
        }
    }
}

impl LinkPolicy {
    /// Settings applied before the join, while the full sub-band is in use
    pub fn prepare_join<R: RadioStack>(&self, radio: &mut R) {
        radio.select_sub_band(link::SUB_BAND);
        radio.set_clock_error_percent(self.clock_error_percent);
        radio.set_link_check(self.link_check);
        radio.set_adr(self.adr);
    }

    /// Apply the full policy to a joined session.
    ///
    /// Returns the number of channels disabled.
    pub fn apply<R: RadioStack>(&self, radio: &mut R) -> u8 {
        let mut disabled = 0;
        for channel in 0..radio.channel_count() {
            if !self.enabled_channels.contains(&channel) {
                radio.disable_channel(channel);
                disabled += 1;
            }
        }

        radio.set_link_check(self.link_check);
        radio.set_data_rate(self.spreading_factor, self.tx_power_dbm);
        radio.set_adr(self.adr);
        radio.set_clock_error_percent(self.clock_error_percent);

        log::info!(
            "Link policy applied: {} channels disabled, ADR {}, {:?} @ {} dBm",
            disabled,
            if self.adr { "on" } else { "off" },
            self.spreading_factor,
            self.tx_power_dbm
        );
        disabled
    }
}
