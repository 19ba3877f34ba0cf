//! NormInterpreter: owns the fact store, the active program and the
//! obligation set, and runs verification passes over them.
//!
//! A pass is computed in full before anything is assigned, so a failing
//! pass leaves the interpreter exactly as it was.

mod reconcile;
mod solver;

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, instrument};

use normboard_core::config::VerificationConfig;
use normboard_core::errors::{ParseError, VerificationError};
use normboard_core::models::{
    Literal, NormativeProgram, NormativeState, Obligation, ObligationKey, ProgramSummary,
    VerificationReport,
};

use crate::registry::ProviderRegistry;
use crate::store::FactStore;
use reconcile::{instantiate, reconcile};
use solver::Solver;

#[derive(Debug, Clone, Default)]
pub struct NormInterpreter {
    program: Option<Arc<NormativeProgram>>,
    store: FactStore,
    obligations: BTreeMap<ObligationKey, Obligation>,
    config: VerificationConfig,
    last_verified_at: Option<i64>,
    verification_count: u64,
}

impl NormInterpreter {
    pub fn new(config: VerificationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replace the active rule set. Obligations are reconciled by the next pass.
    pub fn load_program(&mut self, program: NormativeProgram) {
        debug!(program = %program.name, norms = program.len(), "loading normative program");
        self.program = Some(Arc::new(program));
    }

    pub fn program(&self) -> Option<&NormativeProgram> {
        self.program.as_deref()
    }

    pub fn add_fact(&mut self, fact: Literal) -> Result<bool, ParseError> {
        self.store.add_fact(fact)
    }

    pub fn remove_fact(&mut self, fact: &Literal) -> Result<bool, ParseError> {
        self.store.remove_fact(fact)
    }

    pub fn store(&self) -> &FactStore {
        &self.store
    }

    /// Current obligations in key order.
    pub fn obligations(&self) -> impl Iterator<Item = &Obligation> {
        self.obligations.values()
    }

    /// Number of successful passes.
    pub fn verification_count(&self) -> u64 {
        self.verification_count
    }

    /// Recompute obligations from the current facts, providers and rules.
    ///
    /// Idempotent for a fixed `now`. Without a program every obligation is
    /// retracted.
    #[instrument(skip(self, registry), fields(norms = self.program.as_ref().map_or(0, |p| p.len())))]
    pub fn verify_norms(
        &mut self,
        registry: &ProviderRegistry,
        now: i64,
    ) -> Result<VerificationReport, VerificationError> {
        let solver = Solver::new(&self.store, registry, self.config.max_solutions_per_norm);

        let mut derived = Vec::new();
        if let Some(program) = &self.program {
            for norm in &program.norms {
                for substitution in solver.solve(&norm.id, &norm.condition)? {
                    derived.push(instantiate(norm, &substitution, now)?);
                }
            }
        }

        let (next, report) = reconcile(&self.obligations, derived, &solver, now);
        self.obligations = next;
        self.last_verified_at = Some(now);
        self.verification_count += 1;

        debug!(
            obligations = self.obligations.len(),
            created = report.created.len(),
            retracted = report.retracted.len(),
            "verification pass complete"
        );
        Ok(report)
    }

    /// Serializable snapshot of program, facts and obligations.
    pub fn export_state(&self) -> NormativeState {
        NormativeState {
            program: self.program.as_deref().map(|p| ProgramSummary {
                name: p.name.clone(),
                fingerprint: p.fingerprint(),
                norms: p.norms.iter().map(ToString::to_string).collect(),
            }),
            facts: self.store.facts().cloned().collect(),
            obligations: self.obligations.values().cloned().collect(),
            verified_at: self.last_verified_at,
            verification_count: self.verification_count,
        }
    }

    /// The active program rendered back to norm source.
    pub fn norms_source(&self) -> Option<String> {
        self.program.as_deref().map(ToString::to_string)
    }
}
