use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DEGRADATION_HISTORY, DEFAULT_MAX_RESULTS_PER_CONSULT};

/// Dynamic fact provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Maximum substitutions taken from one `consult` call. Default: 10_000.
    pub max_results_per_consult: usize,
    /// Provider degradation episodes kept for diagnostics. Default: 64.
    pub degradation_history: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            max_results_per_consult: DEFAULT_MAX_RESULTS_PER_CONSULT,
            degradation_history: DEFAULT_DEGRADATION_HISTORY,
        }
    }
}
