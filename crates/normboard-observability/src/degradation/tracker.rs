//! Degradation history per component: failure, fallback, first and last
//! occurrence, recovery status.
//!
//! A component has at most one active entry. Repeated failures while it is
//! degraded bump that entry's counter. The history is capped; recovered
//! entries are evicted oldest first.

use chrono::{DateTime, Duration, Utc};
use normboard_core::constants::DEFAULT_DEGRADATION_HISTORY;
use normboard_core::models::DegradationEvent;
use serde::{Deserialize, Serialize};

/// Recovery status of a degradation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    /// Still in degraded mode.
    Active,
    /// Recovered to normal operation.
    Recovered,
}

/// A degradation episode of one component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    /// The failure that opened the episode.
    pub event: DegradationEvent,
    /// Failures seen during the episode, the first included.
    pub occurrences: u64,
    pub last_seen: DateTime<Utc>,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

impl TrackedDegradation {
    pub fn is_active(&self) -> bool {
        self.recovery_status == RecoveryStatus::Active
    }
}

#[derive(Debug, Clone)]
pub struct DegradationTracker {
    events: Vec<TrackedDegradation>,
    capacity: usize,
}

impl Default for DegradationTracker {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_DEGRADATION_HISTORY)
    }
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `capacity` episodes (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record a failure. Returns true if it opened a new episode, false if
    /// the component was already degraded.
    pub fn record(&mut self, event: DegradationEvent) -> bool {
        if let Some(active) = self.active_mut(&event.component) {
            active.occurrences += 1;
            active.last_seen = event.timestamp;
            return false;
        }

        crate::tracing_setup::events::degradation_triggered(
            &event.component,
            &event.failure,
            &event.fallback_used,
        );
        self.events.push(TrackedDegradation {
            last_seen: event.timestamp,
            event,
            occurrences: 1,
            recovery_status: RecoveryStatus::Active,
            recovered_at: None,
        });
        self.evict();
        true
    }

    /// Close the active episode of `component`. Returns true if there was one.
    pub fn mark_recovered(&mut self, component: &str) -> bool {
        let Some(active) = self.active_mut(component) else {
            return false;
        };
        active.recovery_status = RecoveryStatus::Recovered;
        active.recovered_at = Some(Utc::now());
        crate::tracing_setup::events::degradation_recovered(component);
        true
    }

    pub fn events(&self) -> &[TrackedDegradation] {
        &self.events
    }

    pub fn active_degradations(&self) -> Vec<&TrackedDegradation> {
        self.events.iter().filter(|t| t.is_active()).collect()
    }

    pub fn is_degraded(&self, component: &str) -> bool {
        self.events
            .iter()
            .any(|t| t.event.component == component && t.is_active())
    }

    /// How long `component` has been continuously degraded as of `now`.
    pub fn degraded_duration(&self, component: &str, now: DateTime<Utc>) -> Option<Duration> {
        self.events
            .iter()
            .find(|t| t.event.component == component && t.is_active())
            .map(|t| now - t.event.timestamp)
    }

    fn active_mut(&mut self, component: &str) -> Option<&mut TrackedDegradation> {
        self.events
            .iter_mut()
            .find(|t| t.event.component == component && t.is_active())
    }

    fn evict(&mut self) {
        while self.events.len() > self.capacity {
            let idx = self
                .events
                .iter()
                .position(|t| !t.is_active())
                .unwrap_or(0);
            self.events.remove(idx);
        }
    }
}
