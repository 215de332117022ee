#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod network;
pub mod node;
pub mod payload;
pub mod radio;
pub mod scheduler;
pub mod sensor;
pub mod status;
pub mod timer;
pub mod watchdog;

// These modules depend on embassy and hardware crates only available with the embedded feature
#[cfg(feature = "embedded")]
pub mod tasks;

pub use node::TelemetryNode;
