//! Embassy tasks module
//!
//! Board firmware spawns these from its own executor tasks.

pub mod led;
pub mod node;

pub use led::{led_task, LedReceiver, LedSender, LedSink, LED_CHANNEL};
pub use node::node_task;
