//! # normboard-observability
//!
//! Structured logging for the normative board: subscriber installation,
//! span macros per operation, event helpers, and the degradation tracker
//! that makes provider failures observable.

pub mod degradation;
pub mod tracing_setup;

pub use degradation::{DegradationTracker, RecoveryStatus, TrackedDegradation};
pub use tracing_setup::init_tracing;
