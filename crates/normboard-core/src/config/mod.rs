//! Board configuration, loaded from TOML with per-section defaults.
//!
//! # Examples
//!
//! ```
//! use normboard_core::config::NormBoardConfig;
//!
//! let config = NormBoardConfig::from_toml("[provider]\nmax_results_per_consult = 16\n").unwrap();
//! assert_eq!(config.provider.max_results_per_consult, 16);
//! assert!(config.board.publish_debug_view);
//! ```

mod board_config;
mod observability_config;
mod provider_config;
mod verification_config;

pub use board_config::BoardConfig;
pub use observability_config::ObservabilityConfig;
pub use provider_config::ProviderConfig;
pub use verification_config::VerificationConfig;

use serde::{Deserialize, Serialize};

use crate::errors::BoardResult;

/// Root configuration for a normative board.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormBoardConfig {
    pub board: BoardConfig,
    pub provider: ProviderConfig,
    pub verification: VerificationConfig,
    pub observability: ObservabilityConfig,
}

impl NormBoardConfig {
    /// Parse a TOML document. Missing sections and fields keep their defaults.
    pub fn from_toml(source: &str) -> BoardResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Render the configuration back to TOML.
    pub fn to_toml(&self) -> BoardResult<String> {
        toml::to_string_pretty(self).map_err(|e| crate::BoardError::Config(e.to_string()))
    }
}
