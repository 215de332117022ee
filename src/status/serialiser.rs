//! Status frame serialiser with COBS encoding
//!
//! Serialises node status snapshots into COBS-encoded frames for a serial
//! monitor or an external display controller.
//!
//! # Frame Format
//!
//! ```text
//! [version: u8][msg_id: u8][length: u16 LE][payload][crc16: u16 LE]
//! ```
//!
//! The status payload (20 bytes):
//! ```text
//! [tx_count: u32 LE][next_tx_s: u16 LE][last_event: u8][errors: u8]
//! [network_status: u8][flags: u8][avg_interval_ms: u32 LE][uplink frame: 6]
//! ```
//!
//! `flags` bit 0 = reading valid, bit 1 = joined. The trailing six bytes are
//! the reading encoded exactly as it goes over the air. CRC-16-XMODEM
//! (polynomial 0x1021, init 0x0000) covers everything before it.

use crate::config::status::{MAX_FRAME_SIZE, PROTOCOL_VERSION, STATUS_ID};
use crate::payload;
use crate::status::sink::StatusSink;
use crate::status::snapshot::NodeStatus;
use crc::{Crc, CRC_16_XMODEM};
use heapless::Vec;

const CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Length of the status payload in bytes
pub const STATUS_PAYLOAD_LEN: usize = 20;

const FLAG_VALID: u8 = 0x01;
const FLAG_JOINED: u8 = 0x02;

/// Calculate CRC-16-XMODEM over a raw frame
pub fn calculate_crc(data: &[u8]) -> u16 {
    CRC.checksum(data)
}

/// Serialiser for status frames
pub struct StatusSerialiser;

impl StatusSerialiser {
    /// Create a new status serialiser
    pub fn new() -> Self {
        Self
    }

    /// Serialise a snapshot to a COBS-encoded frame
    ///
    /// Returns the complete frame including COBS encoding and zero delimiter.
    pub fn serialise(&self, status: &NodeStatus) -> Vec<u8, MAX_FRAME_SIZE> {
        let raw = self.build_raw_frame(status);

        // corncobs::encode_buf includes the trailing zero delimiter
        self.cobs_encode(&raw)
    }

    /// Build the raw (unencoded) frame with CRC
    fn build_raw_frame(&self, status: &NodeStatus) -> Vec<u8, MAX_FRAME_SIZE> {
        let mut frame: Vec<u8, MAX_FRAME_SIZE> = Vec::new();

        let _ = frame.push(PROTOCOL_VERSION);
        let _ = frame.push(STATUS_ID);
        let _ = frame.extend_from_slice(&(STATUS_PAYLOAD_LEN as u16).to_le_bytes());

        let next_tx = status.seconds_until_next.min(u16::MAX as u32) as u16;
        let errors = status.consecutive_errors.min(u8::MAX as u32) as u8;
        let mut flags = 0;
        if status.reading.valid {
            flags |= FLAG_VALID;
        }
        if status.joined {
            flags |= FLAG_JOINED;
        }

        let _ = frame.extend_from_slice(&status.tx_count.to_le_bytes());
        let _ = frame.extend_from_slice(&next_tx.to_le_bytes());
        let _ = frame.push(status.last_event_code());
        let _ = frame.push(errors);
        let _ = frame.push(status.network_status.code());
        let _ = frame.push(flags);
        let _ = frame.extend_from_slice(&(status.average_interval_ms as u32).to_le_bytes());
        let _ = frame.extend_from_slice(payload::encode(&status.reading).as_bytes());

        let crc = calculate_crc(&frame);
        let _ = frame.extend_from_slice(&crc.to_le_bytes());

        frame
    }

    /// COBS encode a buffer using corncobs
    fn cobs_encode(&self, data: &[u8]) -> Vec<u8, MAX_FRAME_SIZE> {
        let mut output: Vec<u8, MAX_FRAME_SIZE> = Vec::new();
        output.resize(corncobs::max_encoded_len(data.len()), 0).ok();
        let len = corncobs::encode_buf(data, &mut output);
        output.truncate(len);
        output
    }
}

impl Default for StatusSerialiser {
    fn default() -> Self {
        Self::new()
    }
}

/// COBS decode using corncobs (for testing/verification)
#[allow(clippy::result_unit_err)]
pub fn cobs_decode(encoded: &[u8]) -> Result<Vec<u8, MAX_FRAME_SIZE>, ()> {
    let mut output: Vec<u8, MAX_FRAME_SIZE> = Vec::new();
    output.resize(encoded.len(), 0).map_err(|_| ())?;
    let len = corncobs::decode_buf(encoded, &mut output).map_err(|_| ())?;
    output.truncate(len);
    Ok(output)
}

/// Sink that writes each snapshot as a status frame to a byte stream
pub struct FramedSink<W> {
    writer: W,
    serialiser: StatusSerialiser,
}

impl<W: embedded_io::Write> FramedSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            serialiser: StatusSerialiser::new(),
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl<W: embedded_io::Write> StatusSink for FramedSink<W> {
    fn publish(&mut self, status: &NodeStatus) {
        let encoded = self.serialiser.serialise(status);
        // Monitor may be disconnected; drop the frame
        let _ = self.writer.write_all(&encoded);
    }
}
