//! Span definitions per board operation: load, fact mutation, provider update,
//! verification.

/// Create a program load span.
#[macro_export]
macro_rules! load_span {
    ($board:expr) => {
        tracing::info_span!("normboard.load", board = %$board)
    };
}

/// Create a fact mutation span.
#[macro_export]
macro_rules! fact_span {
    ($board:expr, $op:expr, $fact:expr) => {
        tracing::info_span!("normboard.fact", board = %$board, op = $op, fact = %$fact)
    };
}

/// Create a provider update span.
#[macro_export]
macro_rules! provider_span {
    ($board:expr, $provider:expr) => {
        tracing::info_span!("normboard.provider", board = %$board, provider = %$provider)
    };
}

/// Create a verification span.
#[macro_export]
macro_rules! verify_span {
    ($board:expr) => {
        tracing::debug_span!("normboard.verify", board = %$board)
    };
}

