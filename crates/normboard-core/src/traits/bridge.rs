use crate::errors::BridgeError;
use crate::models::{NormativeEvent, NormativeState};

/// Fire-and-forget sink for board snapshots and signals.
///
/// Errors are logged by the board and never roll back its state.
pub trait SignalBridge: Send + Sync {
    /// Publish the state after a mutating operation.
    fn publish(&self, snapshot: &NormativeState) -> Result<(), BridgeError>;

    /// Publish the human-readable debug view.
    fn publish_debug_view(&self, text: &str) -> Result<(), BridgeError>;

    /// Emit one obligation lifecycle signal.
    fn signal(&self, _event: &NormativeEvent) -> Result<(), BridgeError> {
        Ok(())
    }
}
