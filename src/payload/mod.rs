pub mod codec;
pub mod types;

pub use codec::{decode, encode};
pub use types::{PayloadError, SensorKind, SensorReading, UplinkFrame};
