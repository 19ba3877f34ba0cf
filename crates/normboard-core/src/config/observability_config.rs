use serde::{Deserialize, Serialize};

/// Logging settings consumed by `normboard-observability`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter directive when `RUST_LOG` is unset. Default: "info".
    pub log_level: String,
    /// Emit JSON lines instead of human-readable output. Default: false.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
