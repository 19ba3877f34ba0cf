//! # normboard-core
//!
//! Foundation crate for the normative board.
//! Defines the logical terms, obligations, programs, errors, config,
//! collaborator traits and constants. Every other crate in the workspace
//! depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::NormBoardConfig;
pub use errors::{BoardError, BoardResult};
pub use models::{
    AgentId, Literal, NormativeProgram, NormativeState, Obligation, ObligationState,
    PredicateSignature, Substitution, Term,
};
