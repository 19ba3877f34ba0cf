//! Data model: logical terms, obligations, normative programs and snapshots.

mod degradation_event;
mod obligation;
mod program;
mod state;
mod substitution;
mod term;

pub use degradation_event::DegradationEvent;
pub use obligation::{AgentId, Obligation, ObligationKey, ObligationState};
pub use program::{ConditionGoal, Consequence, DeadlineSpec, Norm, NormativeProgram};
pub use state::{NormativeEvent, NormativeState, ProgramSummary, VerificationReport};
pub use substitution::Substitution;
pub use term::{Literal, PredicateSignature, Term};
