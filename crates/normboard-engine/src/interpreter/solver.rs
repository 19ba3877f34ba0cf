//! Depth-first enumeration of norm condition solutions.

use normboard_core::errors::VerificationError;
use normboard_core::models::{ConditionGoal, Literal, Substitution};

use crate::registry::ProviderRegistry;
use crate::store::FactStore;

type Solutions<'a> = Box<dyn Iterator<Item = Substitution> + 'a>;

/// Resolves literals against the provider registry first, then the store.
pub(crate) struct Solver<'a> {
    store: &'a FactStore,
    registry: &'a ProviderRegistry,
    limit: usize,
}

impl<'a> Solver<'a> {
    pub(crate) fn new(store: &'a FactStore, registry: &'a ProviderRegistry, limit: usize) -> Self {
        Self {
            store,
            registry,
            limit,
        }
    }

    /// Every substitution satisfying the conjunction `goals`, left to right.
    pub(crate) fn solve(
        &self,
        norm_id: &str,
        goals: &[ConditionGoal],
    ) -> Result<Vec<Substitution>, VerificationError> {
        let mut out = Vec::new();
        self.search(norm_id, goals, Substitution::new(), &mut out)?;
        Ok(out)
    }

    fn search(
        &self,
        norm_id: &str,
        goals: &[ConditionGoal],
        substitution: Substitution,
        out: &mut Vec<Substitution>,
    ) -> Result<(), VerificationError> {
        let Some((first, rest)) = goals.split_first() else {
            if out.len() >= self.limit {
                return Err(VerificationError::SolutionLimitExceeded {
                    norm_id: norm_id.to_string(),
                    limit: self.limit,
                });
            }
            out.push(substitution);
            return Ok(());
        };

        match first {
            ConditionGoal::Holds(literal) => {
                for next in self.resolve(literal, &substitution) {
                    self.search(norm_id, rest, next, out)?;
                }
                Ok(())
            }
            ConditionGoal::NotHolds(literal) => {
                if self.holds(literal, &substitution) {
                    Ok(())
                } else {
                    self.search(norm_id, rest, substitution, out)
                }
            }
        }
    }

    /// True if `literal` has at least one solution under `substitution`.
    pub(crate) fn holds(&self, literal: &Literal, substitution: &Substitution) -> bool {
        self.resolve(literal, substitution).next().is_some()
    }

    fn resolve(&self, literal: &Literal, substitution: &Substitution) -> Solutions<'a> {
        let bound = substitution.apply_literal(literal);
        match self.registry.consult(&bound, substitution) {
            Some(stream) => Box::new(stream),
            None => Box::new(self.store.matching(literal, substitution)),
        }
    }
}
