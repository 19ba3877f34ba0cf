//! Degradation tracking for dynamic fact providers.

pub mod tracker;

pub use tracker::{DegradationTracker, RecoveryStatus, TrackedDegradation};
