pub mod acquisition;
pub mod traits;

pub use acquisition::{SensorAcquisition, SensorFault};
pub use traits::HumiditySensor;
