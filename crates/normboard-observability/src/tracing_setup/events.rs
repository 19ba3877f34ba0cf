//! Structured events emitted at well-known points.

use normboard_core::models::{NormativeEvent, VerificationReport};

/// A component fell back to a degraded mode.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(component, failure, fallback, "degradation triggered");
}

/// A component left degraded mode.
pub fn degradation_recovered(component: &str) {
    tracing::info!(component, "degradation recovered");
}

/// One obligation lifecycle signal.
pub fn obligation_signal(board: &str, event: &NormativeEvent) {
    let obligation = event.obligation();
    tracing::info!(
        board,
        signal = event.signal_name(),
        bearer = %obligation.bearer,
        norm = %obligation.norm_id,
        goal = %obligation.goal,
        deadline = obligation.deadline,
        "obligation signal"
    );
}

/// Summary of a finished verification pass.
pub fn verification_finished(board: &str, report: &VerificationReport) {
    tracing::debug!(
        board,
        created = report.created.len(),
        fulfilled = report.fulfilled.len(),
        unfulfilled = report.unfulfilled.len(),
        retracted = report.retracted.len(),
        "verification pass finished"
    );
}
