//! Compile-time configuration for the DHT22 LoRaWAN telemetry node

/// Uplink cadence and retry delays
pub mod cadence {
    /// Target interval between uplinks
    pub const TX_INTERVAL_MS: u32 = 10_000;

    /// Retry delay while the MAC has a transmission in flight
    pub const BUSY_RETRY_MS: u32 = 500;

    /// Retry delay while the session is not joined
    pub const JOIN_RETRY_MS: u32 = 1_000;

    /// Settling delay between a successful join and the first uplink
    pub const JOIN_SETTLE_MS: u32 = 2_000;

    /// Delay between iterations of the node loop
    pub const LOOP_TICK_MS: u64 = 10;
}

/// DHT22 sensor limits
pub mod sensor {
    /// Consecutive failures tolerated before the driver is re-initialised
    pub const REINIT_THRESHOLD: u32 = 5;

    pub const TEMPERATURE_MIN_C: f32 = -40.0;
    pub const TEMPERATURE_MAX_C: f32 = 80.0;
    pub const HUMIDITY_MIN_PCT: f32 = 0.0;
    pub const HUMIDITY_MAX_PCT: f32 = 100.0;

    /// Value carried by both fields of an invalid reading
    pub const FAULT_SENTINEL: f32 = -999.0;
}

/// Uplink payload layout
pub mod payload {
    /// Frame length in bytes
    pub const FRAME_LEN: usize = 6;

    /// Fixed-point scale applied to temperature and humidity
    pub const SCALE: f32 = 100.0;

    /// Status flag: reading is valid
    pub const STATUS_VALID: u8 = 0x01;

    /// Sensor type tag for the DHT22 (AM2302)
    pub const SENSOR_TYPE_DHT22: u8 = 0x22;

    /// LoRaWAN application port used for uplinks
    pub const FPORT: u8 = 1;

    /// Uplinks are sent unconfirmed
    pub const CONFIRMED: bool = false;
}

/// Interval history
pub mod timing {
    /// Number of observed intervals kept for the running average
    pub const HISTORY_DEPTH: usize = 10;
}

/// Fixed link configuration applied after join (US915)
pub mod link {
    /// Sub-band selected before joining
    pub const SUB_BAND: u8 = 1;

    /// Number of uplink channels in the US915 plan
    pub const CHANNEL_COUNT: u8 = 72;

    /// Channels left enabled after join, one per sub-band
    pub const ENABLED_CHANNELS: [u8; 8] = [8, 16, 24, 32, 40, 48, 56, 64];

    pub const TX_POWER_DBM: i8 = 14;

    /// Tolerated clock drift, in percent
    pub const CLOCK_ERROR_PCT: u8 = 2;
}

/// Liveness watchdog
pub mod watchdog {
    /// Window after which a missing feed restarts the node
    pub const TIMEOUT_S: u32 = 30;
}

/// TX indicator LED
pub mod led {
    /// Duration of the flash around an uplink submission
    pub const TX_FLASH_MS: u64 = 30;

    /// Blinks shown at start-up to prove the LED works
    pub const SELF_TEST_BLINKS: u8 = 3;
    pub const SELF_TEST_BLINK_MS: u64 = 100;
}

/// Serial status framing
pub mod status {
    /// Frame delimiter for COBS encoding
    pub const FRAME_DELIMITER: u8 = 0x00;

    /// Maximum encoded status frame size
    pub const MAX_FRAME_SIZE: usize = 64;

    /// Protocol version (increment when the status layout changes)
    pub const PROTOCOL_VERSION: u8 = 1;

    /// Message identifier of a node status frame
    pub const STATUS_ID: u8 = 0x20;
}
