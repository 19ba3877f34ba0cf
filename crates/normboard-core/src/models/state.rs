//! Snapshots and lifecycle events surfaced to the signal/export bridge.

use serde::{Deserialize, Serialize};

use super::obligation::Obligation;
use super::term::Literal;

/// Summary of the loaded program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramSummary {
    pub name: String,
    pub fingerprint: String,
    /// Each norm rendered back to source.
    pub norms: Vec<String>,
}

/// Serializable view of norms, facts and obligations after a pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormativeState {
    pub program: Option<ProgramSummary>,
    pub facts: Vec<Literal>,
    pub obligations: Vec<Obligation>,
    /// Clock reading of the last verification pass.
    pub verified_at: Option<i64>,
    pub verification_count: u64,
}

impl NormativeState {
    pub fn active_obligations(&self) -> impl Iterator<Item = &Obligation> {
        self.obligations.iter().filter(|o| o.is_active())
    }

    /// The observable `obligation(bearer, reason, goal, deadline)` tuples.
    pub fn observable_properties(&self) -> Vec<Literal> {
        self.active_obligations().map(Obligation::to_literal).collect()
    }
}

/// Obligation lifecycle signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "obligation")]
pub enum NormativeEvent {
    ObligationCreated(Obligation),
    ObligationFulfilled(Obligation),
    ObligationUnfulfilled(Obligation),
    /// The norm condition stopped holding.
    ObligationInactive(Obligation),
}

impl NormativeEvent {
    pub fn obligation(&self) -> &Obligation {
        match self {
            Self::ObligationCreated(o)
            | Self::ObligationFulfilled(o)
            | Self::ObligationUnfulfilled(o)
            | Self::ObligationInactive(o) => o,
        }
    }

    /// Signal name as emitted to organisational agents.
    pub fn signal_name(&self) -> &'static str {
        match self {
            Self::ObligationCreated(_) => "oblCreated",
            Self::ObligationFulfilled(_) => "oblFulfilled",
            Self::ObligationUnfulfilled(_) => "oblUnfulfilled",
            Self::ObligationInactive(_) => "oblInactive",
        }
    }
}

/// What changed during one verification pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub verified_at: i64,
    pub created: Vec<Obligation>,
    pub fulfilled: Vec<Obligation>,
    pub unfulfilled: Vec<Obligation>,
    pub retracted: Vec<Obligation>,
}

impl VerificationReport {
    /// True when the pass changed nothing.
    pub fn is_quiet(&self) -> bool {
        self.created.is_empty()
            && self.fulfilled.is_empty()
            && self.unfulfilled.is_empty()
            && self.retracted.is_empty()
    }

    /// Events in emission order: created, fulfilled, unfulfilled, inactive.
    pub fn events(&self) -> Vec<NormativeEvent> {
        let created = self.created.iter().cloned().map(NormativeEvent::ObligationCreated);
        let fulfilled = self.fulfilled.iter().cloned().map(NormativeEvent::ObligationFulfilled);
        let unfulfilled = self
            .unfulfilled
            .iter()
            .cloned()
            .map(NormativeEvent::ObligationUnfulfilled);
        let retracted = self.retracted.iter().cloned().map(NormativeEvent::ObligationInactive);
        created.chain(fulfilled).chain(unfulfilled).chain(retracted).collect()
    }
}
