use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MAX_SOLUTIONS_PER_NORM;

/// Verification pass settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Maximum condition solutions per norm per pass. Default: 100_000.
    pub max_solutions_per_norm: usize,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            max_solutions_per_norm: DEFAULT_MAX_SOLUTIONS_PER_NORM,
        }
    }
}
