//! Human-readable debug view.

use std::fmt::Write;

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use normboard_core::models::{Literal, NormativeState};
use normboard_observability::TrackedDegradation;

fn timestamp(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| millis.to_string())
}

/// Render the board state. The dynamic facts section lists what each
/// provider currently computes and is omitted when they compute nothing.
/// Degraded providers are listed last, with how long they have been down.
pub fn render_debug_text(
    board_id: &str,
    state: &NormativeState,
    dynamic_facts: &[(String, Vec<Literal>)],
    degraded: &[(TrackedDegradation, Duration)],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "** normative board {board_id}");

    match &state.program {
        Some(program) => {
            let _ = writeln!(out, "\n** program {} ({})", program.name, program.fingerprint);
            for norm in &program.norms {
                let _ = writeln!(out, "     {norm}");
            }
        }
        None => out.push_str("\n** no program loaded\n"),
    }

    out.push_str("\n** facts:\n");
    for fact in &state.facts {
        let _ = writeln!(out, "     {fact}");
    }

    out.push_str("\n** obligations:\n");
    for obligation in &state.obligations {
        let _ = writeln!(
            out,
            "     {} {} deadline {}",
            obligation.state,
            obligation.to_literal(),
            timestamp(obligation.deadline)
        );
    }

    if let Some(at) = state.verified_at {
        let _ = writeln!(
            out,
            "\n** verified at {} (pass {})",
            timestamp(at),
            state.verification_count
        );
    }

    let mut first = true;
    for (provider, facts) in dynamic_facts {
        for fact in facts {
            if first {
                out.push_str("\n\n** dynamic facts:\n");
                first = false;
            }
            let _ = writeln!(out, "     {fact}  [{provider}]");
        }
    }

    if !degraded.is_empty() {
        out.push_str("\n** degraded providers:\n");
        for (tracked, lasted) in degraded {
            let _ = writeln!(
                out,
                "     {}  {} ({} failures over {}s)",
                tracked.event.component,
                tracked.event.failure,
                tracked.occurrences,
                lasted.num_seconds()
            );
        }
    }
    out
}
