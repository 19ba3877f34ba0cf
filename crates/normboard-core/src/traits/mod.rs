//! Collaborator seams: dynamic fact providers, the signal/export bridge and
//! the clock.

mod bridge;
mod clock;
mod provider;

pub use bridge::SignalBridge;
pub use clock::{Clock, ManualClock, SystemClock};
pub use provider::{DynamicFactProvider, SubstitutionStream};
