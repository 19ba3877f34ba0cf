//! FactStore: the set of ground facts, indexed by predicate signature.

use std::collections::{BTreeMap, BTreeSet};

use normboard_core::errors::ParseError;
use normboard_core::models::{Literal, PredicateSignature, Substitution};

/// Ground fact base. Iteration order is deterministic (signature, then fact).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactStore {
    facts: BTreeMap<PredicateSignature, BTreeSet<Literal>>,
}

impl FactStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_ground(fact: &Literal) -> Result<(), ParseError> {
        if fact.is_ground() {
            return Ok(());
        }
        let vars: Vec<_> = fact.vars().into_iter().collect();
        Err(ParseError::malformed_fact(
            fact.to_string(),
            format!("free variables not permitted: {}", vars.join(", ")),
        ))
    }

    /// Insert `fact`. Returns true if the store changed.
    pub fn add_fact(&mut self, fact: Literal) -> Result<bool, ParseError> {
        Self::ensure_ground(&fact)?;
        Ok(self.facts.entry(fact.signature()).or_default().insert(fact))
    }

    /// Remove `fact` if present. Returns true if the store changed.
    pub fn remove_fact(&mut self, fact: &Literal) -> Result<bool, ParseError> {
        Self::ensure_ground(fact)?;
        let signature = fact.signature();
        let Some(bucket) = self.facts.get_mut(&signature) else {
            return Ok(false);
        };
        let removed = bucket.remove(fact);
        if bucket.is_empty() {
            self.facts.remove(&signature);
        }
        Ok(removed)
    }

    pub fn contains(&self, fact: &Literal) -> bool {
        self.facts
            .get(&fact.signature())
            .is_some_and(|bucket| bucket.contains(fact))
    }

    pub fn len(&self) -> usize {
        self.facts.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn facts(&self) -> impl Iterator<Item = &Literal> {
        self.facts.values().flatten()
    }

    /// Lazily yield every extension of `substitution` under which `pattern`
    /// matches a stored fact.
    pub fn matching<'a>(
        &'a self,
        pattern: &Literal,
        substitution: &Substitution,
    ) -> impl Iterator<Item = Substitution> + Send + 'a {
        let bucket = self.facts.get(&pattern.signature());
        let pattern = pattern.clone();
        let substitution = substitution.clone();
        bucket
            .into_iter()
            .flatten()
            .filter_map(move |fact| substitution.match_literal(&pattern, fact))
    }
}
