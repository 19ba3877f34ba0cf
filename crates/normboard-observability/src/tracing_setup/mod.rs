//! Subscriber installation, span macros, and event helpers.

pub mod events;
pub mod spans;

use normboard_core::config::ObservabilityConfig;
use normboard_core::errors::{BoardError, BoardResult};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `config.log_level`. Fails if a global subscriber is
/// already installed or the filter directive is invalid.
pub fn init_tracing(config: &ObservabilityConfig) -> BoardResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .map_err(|e| BoardError::Config(format!("invalid log level: {e}")))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| BoardError::Config(format!("tracing already initialized: {e}")))
}
