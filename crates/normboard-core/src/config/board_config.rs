use serde::{Deserialize, Serialize};

/// Orchestrator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Board identifier. A random id is generated when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_id: Option<String>,
    /// Whether to push the debug text to the bridge after each operation. Default: true.
    pub publish_debug_view: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            board_id: None,
            publish_debug_view: true,
        }
    }
}
