//! Error taxonomy.
//!
//! Each subsystem has its own `thiserror` enum; [`BoardError`] aggregates
//! them at the operation boundary.

mod board_error;
mod bridge_error;
mod parse_error;
mod provider_error;
mod verification_error;

pub use board_error::{BoardError, BoardResult};
pub use bridge_error::BridgeError;
pub use parse_error::ParseError;
pub use provider_error::ProviderError;
pub use verification_error::VerificationError;
