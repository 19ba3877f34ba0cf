/// Normative board version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name given to a program written without an `np NAME { ... }` wrapper.
pub const DEFAULT_PROGRAM_NAME: &str = "main";

/// Functor of the observable obligation property.
pub const OBLIGATION_FUNCTOR: &str = "obligation";

/// Upper bound on substitutions taken from a single provider consultation.
pub const DEFAULT_MAX_RESULTS_PER_CONSULT: usize = 10_000;

/// Upper bound on condition solutions enumerated for one norm in one pass.
pub const DEFAULT_MAX_SOLUTIONS_PER_NORM: usize = 100_000;

/// Degradation episodes kept per board before recovered ones are evicted.
pub const DEFAULT_DEGRADATION_HISTORY: usize = 64;

/// Degradation component prefix used for provider failures.
pub const PROVIDER_COMPONENT_PREFIX: &str = "provider:";
