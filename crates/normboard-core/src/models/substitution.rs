//! Variable bindings produced while resolving norm conditions.
//!
//! # Examples
//!
//! ```
//! use normboard_core::models::{Literal, Substitution, Term};
//!
//! let pattern = Literal::new("busy", vec![Term::var("X")]);
//! let fact = Literal::new("busy", vec![Term::atom("bob")]);
//! let s = Substitution::new().match_literal(&pattern, &fact).unwrap();
//! assert_eq!(s.get("X"), Some(&Term::atom("bob")));
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::term::{Literal, Term};

/// A mapping from variable name to term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    bindings: BTreeMap<String, Term>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, var: &str) -> Option<&Term> {
        self.bindings.get(var)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Term)> {
        self.bindings.iter()
    }

    /// Bind `var` to `term`, replacing any previous binding.
    pub fn bind(&mut self, var: impl Into<String>, term: Term) {
        self.bindings.insert(var.into(), term);
    }

    /// Builder form of [`Substitution::bind`].
    pub fn with(mut self, var: impl Into<String>, term: Term) -> Self {
        self.bind(var, term);
        self
    }

    /// Replace bound variables in `term`.
    pub fn apply(&self, term: &Term) -> Term {
        match term {
            Term::Var(v) => self.bindings.get(v).cloned().unwrap_or_else(|| term.clone()),
            Term::Compound(lit) => Term::Compound(self.apply_literal(lit)),
            _ => term.clone(),
        }
    }

    pub fn apply_literal(&self, lit: &Literal) -> Literal {
        Literal {
            name: lit.name.clone(),
            args: lit.args.iter().map(|a| self.apply(a)).collect(),
        }
    }

    /// Unify `left` with `right`, extending the bindings.
    ///
    /// Returns `false` on clash; bindings made before the clash are kept, so
    /// callers unify on a clone. The variable `_` matches anything and never
    /// binds. A variable whose binding chain loops back on itself clashes
    /// with everything.
    pub fn unify(&mut self, left: &Term, right: &Term) -> bool {
        let (Some(left), Some(right)) = (self.walk(left).cloned(), self.walk(right).cloned())
        else {
            return false;
        };
        match (&left, &right) {
            (Term::Var(v), _) if v == "_" => true,
            (_, Term::Var(w)) if w == "_" => true,
            (Term::Var(v), Term::Var(w)) if v == w => true,
            (Term::Var(v), _) => {
                self.bindings.insert(v.clone(), right.clone());
                true
            }
            (_, Term::Var(w)) => {
                self.bindings.insert(w.clone(), left.clone());
                true
            }
            (Term::Compound(a), Term::Compound(b)) => self.unify_literals(a, b),
            (a, b) => a == b,
        }
    }

    /// Follow variable bindings until an unbound variable or a non-variable
    /// term. `None` if the chain revisits a variable.
    fn walk<'t>(&'t self, term: &'t Term) -> Option<&'t Term> {
        let mut current = term;
        let mut seen = BTreeSet::new();
        while let Term::Var(v) = current {
            let Some(next) = self.bindings.get(v) else {
                break;
            };
            if !seen.insert(v.as_str()) {
                return None;
            }
            current = next;
        }
        Some(current)
    }

    /// True if some variable's binding leads back to that variable, directly
    /// or through a compound term.
    pub fn has_cycle(&self) -> bool {
        self.bindings.iter().any(|(var, bound)| {
            let mut path = vec![var.as_str()];
            self.loops_back(bound, &mut path)
        })
    }

    fn loops_back<'t>(&'t self, term: &'t Term, path: &mut Vec<&'t str>) -> bool {
        match term {
            Term::Var(v) => {
                if path.contains(&v.as_str()) {
                    return true;
                }
                let Some(bound) = self.bindings.get(v) else {
                    return false;
                };
                path.push(v);
                let found = self.loops_back(bound, path);
                path.pop();
                found
            }
            Term::Compound(lit) => lit.args.iter().any(|a| self.loops_back(a, path)),
            _ => false,
        }
    }

    fn unify_literals(&mut self, a: &Literal, b: &Literal) -> bool {
        a.name == b.name
            && a.args.len() == b.args.len()
            && a.args.iter().zip(&b.args).all(|(x, y)| self.unify(x, y))
    }

    /// Extend this substitution so that `pattern` matches `fact`.
    pub fn match_literal(&self, pattern: &Literal, fact: &Literal) -> Option<Self> {
        let mut next = self.clone();
        next.unify_literals(pattern, fact).then_some(next)
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (var, term)) in self.bindings.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{var} -> {term}")?;
        }
        f.write_str("}")
    }
}
