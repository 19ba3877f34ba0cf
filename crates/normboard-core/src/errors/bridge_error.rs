/// Errors from the signal/export bridge. Logged, never rolled back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("publish failed: {reason}")]
    PublishFailed { reason: String },

    #[error("bridge disconnected")]
    Disconnected,
}
