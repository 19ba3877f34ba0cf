//! Built-in dynamic fact providers.

use std::collections::BTreeSet;
use std::sync::RwLock;

use normboard_core::errors::ProviderError;
use normboard_core::models::{Literal, PredicateSignature, Substitution};
use normboard_core::traits::{DynamicFactProvider, SubstitutionStream};

/// A provider answering from a replaceable set of facts.
///
/// Relevant only for signatures it has been told about, so it can claim a
/// predicate while currently holding no facts for it.
#[derive(Debug, Default)]
pub struct StaticFactProvider {
    signatures: BTreeSet<PredicateSignature>,
    facts: RwLock<Vec<Literal>>,
}

impl StaticFactProvider {
    pub fn new(signatures: impl IntoIterator<Item = PredicateSignature>) -> Self {
        Self {
            signatures: signatures.into_iter().collect(),
            facts: RwLock::new(Vec::new()),
        }
    }

    /// Build a provider claiming exactly the signatures of `facts`.
    pub fn from_facts(facts: Vec<Literal>) -> Self {
        Self {
            signatures: facts.iter().map(Literal::signature).collect(),
            facts: RwLock::new(facts),
        }
    }

    /// Replace the facts served by this provider.
    pub fn set_facts(&self, facts: Vec<Literal>) -> Result<(), ProviderError> {
        let mut guard = self.facts.write().map_err(|e| ProviderError::Unavailable {
            reason: format!("fact lock poisoned: {e}"),
        })?;
        *guard = facts;
        Ok(())
    }
}

impl DynamicFactProvider for StaticFactProvider {
    fn is_relevant(&self, signature: &PredicateSignature) -> bool {
        self.signatures.contains(signature)
    }

    fn consult(
        &self,
        literal: &Literal,
        substitution: &Substitution,
    ) -> Result<SubstitutionStream, ProviderError> {
        let facts = self.facts.read().map_err(|e| ProviderError::ConsultFailed {
            literal: literal.to_string(),
            reason: format!("fact lock poisoned: {e}"),
        })?;
        // Snapshot so the stream does not hold the lock.
        let snapshot: Vec<Literal> = facts.clone();
        let pattern = literal.clone();
        let substitution = substitution.clone();
        Ok(Box::new(
            snapshot
                .into_iter()
                .filter_map(move |fact| substitution.match_literal(&pattern, &fact)),
        ))
    }

    fn dynamic_facts(&self) -> Vec<Literal> {
        self.facts.read().map(|f| f.clone()).unwrap_or_default()
    }
}
