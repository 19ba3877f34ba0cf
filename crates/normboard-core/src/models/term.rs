//! First-order terms and literals.
//!
//! # Examples
//!
//! ```
//! use normboard_core::models::{Literal, Term};
//!
//! let fact = Literal::new("busy", vec![Term::atom("bob")]);
//! assert_eq!(fact.to_string(), "busy(bob)");
//! assert_eq!(fact.signature().to_string(), "busy/1");
//! assert!(fact.is_ground());
//! ```

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A logical term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    /// Lowercase constant, e.g. `bob`.
    Atom(String),
    Int(i64),
    /// Double-quoted string constant.
    Str(String),
    /// Variable: uppercase or `_`-prefixed name.
    Var(String),
    /// Compound term `f(t1, ..., tn)` with `n >= 1`.
    Compound(Literal),
}

impl Term {
    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(name.into())
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    pub fn string(text: impl Into<String>) -> Self {
        Self::Str(text.into())
    }

    pub fn is_var(&self) -> bool {
        matches!(self, Self::Var(_))
    }

    /// True when the term contains no variables.
    pub fn is_ground(&self) -> bool {
        match self {
            Self::Var(_) => false,
            Self::Compound(lit) => lit.is_ground(),
            _ => true,
        }
    }

    /// Collect variable names occurring in the term.
    pub fn collect_vars(&self, out: &mut BTreeSet<String>) {
        match self {
            Self::Var(v) => {
                out.insert(v.clone());
            }
            Self::Compound(lit) => lit.collect_vars(out),
            _ => {}
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(name) | Self::Var(name) => f.write_str(name),
            Self::Int(v) => write!(f, "{v}"),
            Self::Str(text) => {
                f.write_str("\"")?;
                for ch in text.chars() {
                    match ch {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        c => write!(f, "{c}")?,
                    }
                }
                f.write_str("\"")
            }
            Self::Compound(lit) => lit.fmt(f),
        }
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        if lit.args.is_empty() {
            Self::Atom(lit.name)
        } else {
            Self::Compound(lit)
        }
    }
}

impl From<i64> for Term {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

/// A predicate name with an ordered argument list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    pub name: String,
    pub args: Vec<Term>,
}

impl Literal {
    pub fn new(name: impl Into<String>, args: Vec<Term>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// A zero-arity literal.
    pub fn atom(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// View an atom or compound term as a literal.
    pub fn from_term(term: &Term) -> Option<Self> {
        match term {
            Term::Atom(name) => Some(Self::atom(name.clone())),
            Term::Compound(lit) => Some(lit.clone()),
            _ => None,
        }
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn signature(&self) -> PredicateSignature {
        PredicateSignature::new(self.name.clone(), self.args.len())
    }

    pub fn is_ground(&self) -> bool {
        self.args.iter().all(Term::is_ground)
    }

    pub fn collect_vars(&self, out: &mut BTreeSet<String>) {
        for arg in &self.args {
            arg.collect_vars(out);
        }
    }

    /// Variable names in order of their sorted spelling.
    pub fn vars(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_vars(&mut out);
        out
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.args.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

/// Predicate name and arity, e.g. `busy/1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PredicateSignature {
    pub name: String,
    pub arity: usize,
}

impl PredicateSignature {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
        }
    }
}

impl fmt::Display for PredicateSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}
