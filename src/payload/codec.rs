//! Fixed-point codec between readings and uplink frames

use crate::config::payload::{FRAME_LEN, SCALE, SENSOR_TYPE_DHT22, STATUS_VALID};
use crate::config::sensor::FAULT_SENTINEL;
use crate::payload::types::{SensorReading, UplinkFrame};

/// Encode a reading into an uplink frame.
///
/// Never fails. Invalid readings are written as the fault sentinel, which
/// saturates to `i16::MIN` / `0` on the wire, with the status bit cleared.
pub fn encode(reading: &SensorReading) -> UplinkFrame {
    let (temperature, humidity) = if reading.valid {
        (reading.temperature_c, reading.humidity_pct)
    } else {
        (FAULT_SENTINEL, FAULT_SENTINEL)
    };

    // `as` truncates toward zero and saturates at the integer bounds
    let temp_raw = (temperature * SCALE) as i16;
    let hum_raw = (humidity * SCALE) as u16;

    let mut bytes = [0u8; FRAME_LEN];
    bytes[..2].copy_from_slice(&temp_raw.to_be_bytes());
    bytes[2..4].copy_from_slice(&hum_raw.to_be_bytes());
    bytes[4] = if reading.valid { STATUS_VALID } else { 0x00 };
    bytes[5] = SENSOR_TYPE_DHT22;

    UplinkFrame::from_bytes(bytes)
}

/// Decode an uplink frame back into a reading.
///
/// A frame whose status bit is clear decodes to [`SensorReading::invalid`].
pub fn decode(frame: &UplinkFrame) -> SensorReading {
    if !frame.is_valid() {
        return SensorReading::invalid();
    }

    SensorReading::new(
        frame.raw_temperature() as f32 / SCALE,
        frame.raw_humidity() as f32 / SCALE,
    )
}
