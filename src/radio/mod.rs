pub mod events;
pub mod policy;
pub mod traits;

pub use events::RadioEvent;
pub use policy::LinkPolicy;
pub use traits::{RadioError, RadioStack, SpreadingFactor};
