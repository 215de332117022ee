pub mod serialiser;
pub mod sink;
pub mod snapshot;

pub use serialiser::{FramedSink, StatusSerialiser};
pub use sink::{LogSink, NullSink, StatusSink, TxActivity};
pub use snapshot::NodeStatus;
