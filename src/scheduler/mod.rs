pub mod cadence;
pub mod timing;
pub mod transmit;

pub use cadence::CadenceState;
pub use timing::TimingMonitor;
pub use transmit::{AttemptOutcome, DeferReason, SchedulerState, TransmitScheduler};
