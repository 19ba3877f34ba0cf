use crate::errors::ProviderError;
use crate::models::{Literal, PredicateSignature, Substitution};

/// Lazy, finite sequence of substitutions. Consult again to restart.
pub type SubstitutionStream = Box<dyn Iterator<Item = Substitution> + Send>;

/// An external collaborator that computes facts on demand.
pub trait DynamicFactProvider: Send + Sync {
    /// Whether this provider answers for `signature`.
    fn is_relevant(&self, signature: &PredicateSignature) -> bool;

    /// Resolve `literal` under `substitution`. Every yielded substitution
    /// must extend the given one.
    fn consult(
        &self,
        literal: &Literal,
        substitution: &Substitution,
    ) -> Result<SubstitutionStream, ProviderError>;

    /// Facts the provider currently computes, for debug output.
    fn dynamic_facts(&self) -> Vec<Literal> {
        Vec::new()
    }
}
