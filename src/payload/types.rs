//! Reading and frame types for the uplink payload
//!
//! # Frame Format
//!
//! Every uplink is exactly six bytes:
//! ```text
//! [temp_hi][temp_lo][hum_hi][hum_lo][status][sensor_type]
//! ```
//!
//! - `temp`: temperature in °C × 100, signed 16-bit big-endian
//! - `hum`: relative humidity in % × 100, unsigned 16-bit big-endian
//! - `status`: bit 0 set when the reading is valid
//! - `sensor_type`: 0x22 for the DHT22

use crate::config::payload::{FRAME_LEN, SENSOR_TYPE_DHT22, STATUS_VALID};
use crate::config::sensor::FAULT_SENTINEL;

/// A single temperature/humidity sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
    pub valid: bool,
}

impl SensorReading {
    /// Create a valid reading
    pub fn new(temperature_c: f32, humidity_pct: f32) -> Self {
        Self {
            temperature_c,
            humidity_pct,
            valid: true,
        }
    }

    /// Reading that stands in for a failed acquisition.
    ///
    /// Both numeric fields carry the fault sentinel.
    pub fn invalid() -> Self {
        Self {
            temperature_c: FAULT_SENTINEL,
            humidity_pct: FAULT_SENTINEL,
            valid: false,
        }
    }
}

impl Default for SensorReading {
    fn default() -> Self {
        Self::invalid()
    }
}

/// Errors raised when interpreting received bytes as a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadError {
    /// No bytes at all
    Empty,
    /// Fewer than six bytes (carries the received length)
    TooShort(usize),
}

/// Sensor model identified by the frame's type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Dht22,
    Unknown(u8),
}

impl SensorKind {
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            SENSOR_TYPE_DHT22 => Self::Dht22,
            other => Self::Unknown(other),
        }
    }
}

/// Fixed six-byte uplink frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UplinkFrame([u8; FRAME_LEN]);

impl UplinkFrame {
    /// Wrap raw frame bytes
    pub const fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }

    /// Frame bytes in wire order
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// Fixed-point temperature (°C × 100)
    pub fn raw_temperature(&self) -> i16 {
        i16::from_be_bytes([self.0[0], self.0[1]])
    }

    /// Fixed-point humidity (% × 100)
    pub fn raw_humidity(&self) -> u16 {
        u16::from_be_bytes([self.0[2], self.0[3]])
    }

    /// Status flags byte
    pub fn status(&self) -> u8 {
        self.0[4]
    }

    /// True when the status byte marks the reading valid
    pub fn is_valid(&self) -> bool {
        self.status() & STATUS_VALID != 0
    }

    /// Sensor type tag byte
    pub fn sensor_type(&self) -> u8 {
        self.0[5]
    }

    pub fn sensor_kind(&self) -> SensorKind {
        SensorKind::from_tag(self.sensor_type())
    }
}

impl TryFrom<&[u8]> for UplinkFrame {
    type Error = PayloadError;

    /// Interpret received bytes as a frame.
    ///
    /// Bytes past the sixth are ignored.
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.is_empty() {
            return Err(PayloadError::Empty);
        }
        if bytes.len() < FRAME_LEN {
            return Err(PayloadError::TooShort(bytes.len()));
        }

        let mut frame = [0u8; FRAME_LEN];
        frame.copy_from_slice(&bytes[..FRAME_LEN]);
        Ok(Self(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_reading_carries_sentinel() {
        let reading = SensorReading::invalid();
        assert!(!reading.valid);
        assert_eq!(reading.temperature_c, FAULT_SENTINEL);
        assert_eq!(reading.humidity_pct, FAULT_SENTINEL);
    }

    #[test]
    fn test_frame_accessors() {
        let frame = UplinkFrame::from_bytes([0xFF, 0x38, 0x13, 0x88, 0x01, 0x22]);

        assert_eq!(frame.raw_temperature(), -200);
        assert_eq!(frame.raw_humidity(), 5000);
        assert!(frame.is_valid());
        assert_eq!(frame.sensor_kind(), SensorKind::Dht22);
    }

    #[test]
    fn test_try_from_empty() {
        let result = UplinkFrame::try_from(&[][..]);
        assert_eq!(result, Err(PayloadError::Empty));
    }

    #[test]
    fn test_try_from_short() {
        let result = UplinkFrame::try_from(&[0x09, 0x29, 0x16][..]);
        assert_eq!(result, Err(PayloadError::TooShort(3)));
    }

    #[test]
    fn test_try_from_ignores_trailing_bytes() {
        let bytes = [0x09, 0x29, 0x16, 0x2E, 0x01, 0x22, 0xAA, 0xBB];
        let frame = UplinkFrame::try_from(&bytes[..]).expect("Should parse");
        assert_eq!(frame.as_bytes(), &[0x09, 0x29, 0x16, 0x2E, 0x01, 0x22]);
    }

    #[test]
    fn test_unknown_sensor_tag() {
        let frame = UplinkFrame::from_bytes([0, 0, 0, 0, 0, 0x11]);
        assert_eq!(frame.sensor_kind(), SensorKind::Unknown(0x11));
    }
}
