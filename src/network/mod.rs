pub mod bridge;
pub mod session;

pub use bridge::NetworkEventBridge;
pub use session::{NetworkStatus, SessionState};
