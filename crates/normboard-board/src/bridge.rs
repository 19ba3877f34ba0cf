//! Built-in signal/export bridges.

use std::sync::Mutex;

use tracing::{debug, info};

use normboard_core::errors::BridgeError;
use normboard_core::models::{NormativeEvent, NormativeState};
use normboard_core::traits::SignalBridge;

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBridge;

impl SignalBridge for NullBridge {
    fn publish(&self, _snapshot: &NormativeState) -> Result<(), BridgeError> {
        Ok(())
    }

    fn publish_debug_view(&self, _text: &str) -> Result<(), BridgeError> {
        Ok(())
    }
}

/// Writes snapshots and signals to the `tracing` subscriber as JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingBridge;

impl SignalBridge for TracingBridge {
    fn publish(&self, snapshot: &NormativeState) -> Result<(), BridgeError> {
        let json = serde_json::to_string(snapshot).map_err(|e| BridgeError::PublishFailed {
            reason: e.to_string(),
        })?;
        debug!(target: "normboard::bridge", snapshot = %json, "state published");
        Ok(())
    }

    fn publish_debug_view(&self, text: &str) -> Result<(), BridgeError> {
        debug!(target: "normboard::bridge", "{text}");
        Ok(())
    }

    fn signal(&self, event: &NormativeEvent) -> Result<(), BridgeError> {
        info!(
            target: "normboard::bridge",
            signal = event.signal_name(),
            obligation = %event.obligation(),
            "signal"
        );
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Recorded {
    snapshots: Vec<NormativeState>,
    debug_views: Vec<String>,
    signals: Vec<NormativeEvent>,
    failure: Option<BridgeError>,
}

/// Keeps everything it receives in memory. Can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingBridge {
    inner: Mutex<Recorded>,
}

impl RecordingBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `failure`, or succeed again with `None`.
    pub fn fail_with(&self, failure: Option<BridgeError>) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.failure = failure;
        }
    }

    pub fn snapshots(&self) -> Vec<NormativeState> {
        self.inner
            .lock()
            .map(|i| i.snapshots.clone())
            .unwrap_or_default()
    }

    pub fn last_snapshot(&self) -> Option<NormativeState> {
        self.inner.lock().ok()?.snapshots.last().cloned()
    }

    pub fn debug_views(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|i| i.debug_views.clone())
            .unwrap_or_default()
    }

    pub fn signals(&self) -> Vec<NormativeEvent> {
        self.inner
            .lock()
            .map(|i| i.signals.clone())
            .unwrap_or_default()
    }

    /// Signal names in emission order.
    pub fn signal_names(&self) -> Vec<&'static str> {
        self.signals().iter().map(NormativeEvent::signal_name).collect()
    }

    fn record(&self, f: impl FnOnce(&mut Recorded)) -> Result<(), BridgeError> {
        let mut inner = self.inner.lock().map_err(|e| BridgeError::PublishFailed {
            reason: format!("recording lock poisoned: {e}"),
        })?;
        if let Some(failure) = &inner.failure {
            return Err(failure.clone());
        }
        f(&mut inner);
        Ok(())
    }
}

impl SignalBridge for RecordingBridge {
    fn publish(&self, snapshot: &NormativeState) -> Result<(), BridgeError> {
        self.record(|i| i.snapshots.push(snapshot.clone()))
    }

    fn publish_debug_view(&self, text: &str) -> Result<(), BridgeError> {
        self.record(|i| i.debug_views.push(text.to_string()))
    }

    fn signal(&self, event: &NormativeEvent) -> Result<(), BridgeError> {
        self.record(|i| i.signals.push(event.clone()))
    }
}
